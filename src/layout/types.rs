use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u32,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, count: u32) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Raw glyph box for a word at a given font size, before padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordBox {
    pub width: f32,
    pub height: f32,
}

impl WordBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn padded(self, padding: f32) -> Self {
        Self {
            width: self.width + padding,
            height: self.height + padding,
        }
    }
}

/// A word committed to the canvas. `(x, y)` is the baseline-left anchor, so
/// the word covers `[x, x + width] x [y - height, y]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub color: String,
    pub rotation: f32,
    pub opacity: f32,
}

impl PlacedWord {
    pub fn rect(&self) -> Rect {
        Rect::from_baseline(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y - self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y - self.height && y <= self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn from_baseline(x: f32, baseline: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            y1: baseline - height,
            x2: x + width,
            y2: baseline,
        }
    }

    pub fn expand(self, margin: f32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }
}

/// The finished cloud: canvas size plus words in placement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudLayout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

impl CloudLayout {
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            words: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// First word (in placement order) whose box contains the point.
    pub fn word_at(&self, x: f32, y: f32) -> Option<&PlacedWord> {
        self.words.iter().find(|word| word.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(x: f32, y: f32) -> PlacedWord {
        PlacedWord {
            word: "hello".to_string(),
            x,
            y,
            width: 50.0,
            height: 20.0,
            font_size: 16.0,
            color: "#000000".to_string(),
            rotation: 0.0,
            opacity: 1.0,
        }
    }

    #[test]
    fn rect_spans_above_baseline() {
        let rect = word(10.0, 40.0).rect();
        assert_eq!(rect.x1, 10.0);
        assert_eq!(rect.x2, 60.0);
        assert_eq!(rect.y1, 20.0);
        assert_eq!(rect.y2, 40.0);
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::from_baseline(0.0, 10.0, 10.0, 10.0);
        let b = Rect::from_baseline(10.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.expand(0.5).intersects(&b));
    }

    #[test]
    fn word_at_finds_first_hit() {
        let layout = CloudLayout {
            width: 200.0,
            height: 200.0,
            words: vec![word(10.0, 40.0), word(100.0, 140.0)],
        };
        assert_eq!(layout.word_at(20.0, 30.0).map(|w| w.x), Some(10.0));
        assert_eq!(layout.word_at(120.0, 125.0).map(|w| w.x), Some(100.0));
        assert!(layout.word_at(5.0, 5.0).is_none());
    }
}

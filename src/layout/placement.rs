use rand::Rng;

use crate::config::LayoutConfig;

use super::collision::CollisionIndex;
use super::metrics::MetricsProvider;
use super::position::{Canvas, candidate_position};
use super::{CloudLayout, PlacedWord, Rect, WordBox};

/// Words placed so far in one build, plus the index that guards them.
/// Owned by the caller; start a fresh one per run.
#[derive(Debug, Clone)]
pub struct LayoutState {
    canvas: Canvas,
    words: Vec<PlacedWord>,
    collisions: CollisionIndex,
}

impl LayoutState {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            canvas: config.canvas(),
            words: Vec::new(),
            collisions: CollisionIndex::new(config.collision_margin),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.collisions.overlaps(rect)
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.collisions.clear();
    }

    pub fn into_layout(self) -> CloudLayout {
        CloudLayout {
            width: self.canvas.width,
            height: self.canvas.height,
            words: self.words,
        }
    }

    fn commit(&mut self, word: PlacedWord) -> &PlacedWord {
        self.collisions.insert(word.rect());
        self.words.push(word);
        let last = self.words.len() - 1;
        &self.words[last]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    x: f32,
    y: f32,
    distance: f32,
}

/// Places one word, preferring the free candidate closest to the canvas
/// center. `None` means the attempt budget ran out without a free spot.
pub fn place_word<'a, R: Rng + ?Sized>(
    state: &'a mut LayoutState,
    word: &str,
    font_size: f32,
    color: &str,
    config: &LayoutConfig,
    metrics: &dyn MetricsProvider,
    rng: &mut R,
) -> Option<&'a PlacedWord> {
    let word_box = metrics.measure(word, font_size).padded(config.box_padding);
    if !state.canvas.fits(word_box) {
        log::debug!(
            "'{word}' ({:.1}x{:.1}) does not fit the {}x{} canvas",
            word_box.width,
            word_box.height,
            state.canvas.width,
            state.canvas.height
        );
        return None;
    }

    let best = find_position(state, word_box, config, rng)?;
    log::debug!(
        "placed '{word}' at ({:.1}, {:.1}), {:.1} from center",
        best.x,
        best.y,
        best.distance
    );
    Some(state.commit(PlacedWord {
        word: word.to_string(),
        x: best.x,
        y: best.y,
        width: word_box.width,
        height: word_box.height,
        font_size,
        color: color.to_string(),
        rotation: config.rotation,
        opacity: config.opacity,
    }))
}

fn find_position<R: Rng + ?Sized>(
    state: &LayoutState,
    word_box: WordBox,
    config: &LayoutConfig,
    rng: &mut R,
) -> Option<Candidate> {
    let canvas = state.canvas;
    let (cx, cy) = canvas.center();
    let placed = state.len();
    let mut best: Option<Candidate> = None;

    for attempt in 0..config.max_attempts {
        let (raw_x, raw_y) =
            candidate_position(config.strategy, attempt, word_box, canvas, placed, rng);
        let (x, y) = canvas.clamp(raw_x, raw_y, word_box);
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let rect = Rect::from_baseline(x, y, word_box.width, word_box.height);
        if state.collides(&rect) {
            continue;
        }
        let distance = (x + word_box.width / 2.0 - cx).hypot(y - word_box.height / 2.0 - cy);
        if best.is_none_or(|current| distance < current.distance) {
            best = Some(Candidate { x, y, distance });
        }
        if distance < config.center_tolerance {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::position::LayoutStrategy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn block_metrics(word: &str, font_size: f32) -> WordBox {
        WordBox::new(word.chars().count() as f32 * font_size * 0.5, font_size)
    }

    fn config(strategy: LayoutStrategy) -> LayoutConfig {
        LayoutConfig {
            strategy,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn spiral_places_first_word_at_center() {
        let config = config(LayoutStrategy::Spiral);
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let placed = place_word(&mut state, "hello", 40.0, "#fff", &config, &block_metrics, &mut rng)
            .cloned()
            .expect("first word fits");
        let (cx, cy) = placed.center();
        assert!((cx - 400.0).abs() < 20.0 && (cy - 300.0).abs() < 20.0);
        assert_eq!(placed.width, 100.0 + 8.0);
        assert_eq!(placed.height, 48.0);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn second_word_avoids_first() {
        let config = config(LayoutStrategy::Spiral);
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        for word in ["first", "second"] {
            assert!(
                place_word(&mut state, word, 32.0, "#000", &config, &block_metrics, &mut rng)
                    .is_some()
            );
        }
        let words = state.words();
        let a = words[0].rect().expand(config.collision_margin);
        let b = words[1].rect().expand(config.collision_margin);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn oversized_word_is_rejected() {
        let mut config = config(LayoutStrategy::Grid);
        config.canvas_width = 50;
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let placed = place_word(&mut state, "enormous", 48.0, "#000", &config, &block_metrics, &mut rng);
        assert!(placed.is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn exhausted_attempts_return_none() {
        let mut config = config(LayoutStrategy::Circular);
        config.max_attempts = 3;
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        // With at most one word placed every attempt lands on the same point of the ring.
        assert!(place_word(&mut state, "ring", 30.0, "#000", &config, &block_metrics, &mut rng).is_some());
        assert!(place_word(&mut state, "ring", 30.0, "#000", &config, &block_metrics, &mut rng).is_none());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn placed_word_outlives_its_inputs() {
        let config = config(LayoutStrategy::Spiral);
        let mut state = LayoutState::new(&config);
        let placed = {
            let word = String::from("scoped");
            let color = String::from("#123456");
            let mut rng = StdRng::seed_from_u64(2);
            place_word(&mut state, &word, 24.0, &color, &config, &block_metrics, &mut rng)
        };
        let placed = placed.expect("empty canvas has room");
        assert_eq!(placed.word, "scoped");
        assert_eq!(placed.color, "#123456");
    }

    #[test]
    fn clear_resets_state() {
        let config = config(LayoutStrategy::Spiral);
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(place_word(&mut state, "word", 20.0, "#000", &config, &block_metrics, &mut rng).is_some());
        state.clear();
        assert!(state.is_empty());
        let again = place_word(&mut state, "word", 20.0, "#000", &config, &block_metrics, &mut rng).cloned();
        assert!(again.is_some());
    }

    #[test]
    fn placement_carries_presentation_fields() {
        let mut config = config(LayoutStrategy::Grid);
        config.rotation = 15.0;
        config.opacity = 0.5;
        let mut state = LayoutState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        let placed = place_word(&mut state, "tilt", 20.0, "#abc", &config, &block_metrics, &mut rng)
            .cloned()
            .expect("fits");
        assert_eq!(placed.rotation, 15.0);
        assert_eq!(placed.opacity, 0.5);
        assert_eq!(placed.color, "#abc");
    }
}

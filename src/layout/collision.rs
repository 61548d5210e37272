use super::Rect;

/// Boxes of already placed words. Queries expand both sides by `margin`
/// and scan linearly; clouds hold tens of words, not thousands.
#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    margin: f32,
    boxes: Vec<Rect>,
}

impl CollisionIndex {
    /// `margin` must be non-negative; `LayoutConfig::validate` rejects others.
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            boxes: Vec::new(),
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn overlaps(&self, candidate: &Rect) -> bool {
        let candidate = candidate.expand(self.margin);
        self.boxes
            .iter()
            .any(|placed| candidate.intersects(&placed.expand(self.margin)))
    }

    pub fn insert(&mut self, rect: Rect) {
        self.boxes.push(rect);
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_never_overlaps() {
        let index = CollisionIndex::new(10.0);
        assert!(!index.overlaps(&Rect::from_baseline(0.0, 20.0, 40.0, 20.0)));
    }

    #[test]
    fn margin_applies_to_both_boxes() {
        let mut index = CollisionIndex::new(10.0);
        index.insert(Rect::from_baseline(0.0, 20.0, 40.0, 20.0));
        // 20px gap closes exactly when both sides grow by 10.
        assert!(!index.overlaps(&Rect::from_baseline(60.0, 20.0, 40.0, 20.0)));
        assert!(index.overlaps(&Rect::from_baseline(59.0, 20.0, 40.0, 20.0)));
        // Vertical neighbour below the baseline.
        assert!(!index.overlaps(&Rect::from_baseline(0.0, 60.0, 40.0, 20.0)));
        assert!(index.overlaps(&Rect::from_baseline(0.0, 59.0, 40.0, 20.0)));
    }

    #[test]
    fn zero_margin_allows_touching() {
        let mut index = CollisionIndex::new(0.0);
        index.insert(Rect::from_baseline(0.0, 20.0, 40.0, 20.0));
        assert!(!index.overlaps(&Rect::from_baseline(40.0, 20.0, 40.0, 20.0)));
        assert!(index.overlaps(&Rect::from_baseline(39.5, 20.0, 40.0, 20.0)));
    }

    #[test]
    fn clear_forgets_boxes() {
        let mut index = CollisionIndex::new(10.0);
        index.insert(Rect::from_baseline(0.0, 20.0, 40.0, 20.0));
        assert_eq!(index.len(), 1);
        index.clear();
        assert!(index.is_empty());
        assert!(!index.overlaps(&Rect::from_baseline(0.0, 20.0, 40.0, 20.0)));
    }
}

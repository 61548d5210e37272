use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::WordBox;

const RANDOM_INSET: f32 = 5.0;
const SPIRAL_ANGLE_STEP: f32 = 0.18;
const SPIRAL_RADIUS_BASE: f32 = 2.0;
const SPIRAL_RADIUS_STEP: f32 = 1.1;
const GRID_GUTTER: f32 = 20.0;
const GRID_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    #[default]
    Random,
    Spiral,
    Grid,
    Circular,
}

impl LayoutStrategy {
    /// Unknown names fall back to `Random`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "spiral" => Self::Spiral,
            "grid" => Self::Grid,
            "circular" | "circle" => Self::Circular,
            _ => Self::Random,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Spiral => "spiral",
            Self::Grid => "grid",
            Self::Circular => "circular",
        }
    }

    pub fn is_deterministic(self) -> bool {
        !matches!(self, Self::Random)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn fits(&self, word: WordBox) -> bool {
        word.width <= self.width && word.height <= self.height
    }

    /// Pull a baseline-left anchor back inside the canvas.
    pub fn clamp(&self, x: f32, y: f32, word: WordBox) -> (f32, f32) {
        let mut x = x;
        let mut y = y;
        if x < 0.0 {
            x = 0.0;
        }
        if y < word.height {
            y = word.height;
        }
        if x + word.width > self.width {
            x = self.width - word.width;
        }
        if y > self.height {
            y = self.height;
        }
        (x, y)
    }
}

/// Raw (unclamped) anchor for one placement attempt.
pub fn candidate_position<R: Rng + ?Sized>(
    strategy: LayoutStrategy,
    attempt: usize,
    word: WordBox,
    canvas: Canvas,
    placed: usize,
    rng: &mut R,
) -> (f32, f32) {
    match strategy {
        LayoutStrategy::Random => random_position(word, canvas, rng),
        LayoutStrategy::Spiral => spiral_position(attempt, word, canvas),
        LayoutStrategy::Grid => grid_position(attempt, word, canvas),
        LayoutStrategy::Circular => circular_position(attempt, word, canvas, placed),
    }
}

pub fn random_position<R: Rng + ?Sized>(word: WordBox, canvas: Canvas, rng: &mut R) -> (f32, f32) {
    let span_x = canvas.width - word.width - RANDOM_INSET * 2.0;
    let span_y = canvas.height - word.height - RANDOM_INSET * 2.0;
    let x = rng.r#gen::<f32>() * span_x + RANDOM_INSET;
    let y = rng.r#gen::<f32>() * span_y + word.height + RANDOM_INSET;
    (x, y)
}

pub fn spiral_position(attempt: usize, word: WordBox, canvas: Canvas) -> (f32, f32) {
    let (cx, cy) = canvas.center();
    let step = attempt as f32;
    let angle = step * SPIRAL_ANGLE_STEP;
    let radius = SPIRAL_RADIUS_BASE + step * SPIRAL_RADIUS_STEP;
    (
        cx + angle.cos() * radius - word.width / 2.0,
        cy + angle.sin() * radius + word.height / 2.0,
    )
}

pub fn grid_position(attempt: usize, word: WordBox, canvas: Canvas) -> (f32, f32) {
    let cell_w = word.width + GRID_GUTTER;
    let cell_h = word.height + GRID_GUTTER;
    let cols = ((canvas.width / cell_w).floor() as usize).max(1);
    let row = attempt / cols;
    let col = attempt % cols;
    (
        col as f32 * cell_w + GRID_OFFSET,
        row as f32 * cell_h + word.height + GRID_OFFSET,
    )
}

/// The angle divides by the placed count; the first word (count 0) uses 1.
pub fn circular_position(attempt: usize, word: WordBox, canvas: Canvas, placed: usize) -> (f32, f32) {
    let (cx, cy) = canvas.center();
    let radius = canvas.width.min(canvas.height) / 3.0;
    let angle = (attempt as f32 / placed.max(1) as f32) * 2.0 * PI;
    (
        cx + angle.cos() * radius - word.width / 2.0,
        cy + angle.sin() * radius + word.height / 2.0,
    )
}

//! Per-frame offsets for animated clouds.
//!
//! Offsets are closed-form functions of elapsed time and a per-word delay.
//! They never modify the placed words; a renderer applies them on top of
//! the stored geometry for one frame.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::layout::{CloudLayout, PlacedWord};

const MAX_DELAY_MS: f32 = 1000.0;
const BOUNCE_RATE: f32 = 0.003;
const BOUNCE_AMPLITUDE: f32 = 5.0;
const SPIRAL_RATE: f32 = 0.001;
const SPIRAL_RADIUS: f32 = 10.0;
const FADE_RATE: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    None,
    Bounce,
    Spiral,
    Fade,
}

impl AnimationKind {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "bounce" => Self::Bounce,
            "spiral" => Self::Spiral,
            "fade" => Self::Fade,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOffset {
    pub dx: f32,
    pub dy: f32,
    pub opacity_scale: f32,
}

impl FrameOffset {
    pub const IDENTITY: Self = Self {
        dx: 0.0,
        dy: 0.0,
        opacity_scale: 1.0,
    };
}

pub fn frame_offset(kind: AnimationKind, time_ms: f32, delay_ms: f32) -> FrameOffset {
    let t = time_ms + delay_ms;
    match kind {
        AnimationKind::None => FrameOffset::IDENTITY,
        AnimationKind::Bounce => FrameOffset {
            dy: (t * BOUNCE_RATE).sin() * BOUNCE_AMPLITUDE,
            ..FrameOffset::IDENTITY
        },
        AnimationKind::Spiral => {
            let phase = t * SPIRAL_RATE;
            FrameOffset {
                dx: phase.cos() * SPIRAL_RADIUS,
                dy: phase.sin() * SPIRAL_RADIUS,
                ..FrameOffset::IDENTITY
            }
        }
        AnimationKind::Fade => FrameOffset {
            opacity_scale: ((t * FADE_RATE).sin() + 1.0) / 2.0,
            ..FrameOffset::IDENTITY
        },
    }
}

/// One start delay per word, uniform in `[0, 1000)` ms.
pub fn animation_delays<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<f32> {
    (0..count)
        .map(|_| rng.r#gen::<f32>() * MAX_DELAY_MS)
        .collect()
}

/// Transient copies of the words shifted for the frame at `time_ms`.
/// Words without a delay entry start at zero.
pub fn frame_words(
    layout: &CloudLayout,
    kind: AnimationKind,
    time_ms: f32,
    delays: &[f32],
) -> Vec<PlacedWord> {
    layout
        .words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let delay = delays.get(idx).copied().unwrap_or(0.0);
            let offset = frame_offset(kind, time_ms, delay);
            PlacedWord {
                x: word.x + offset.dx,
                y: word.y + offset.dy,
                opacity: word.opacity * offset.opacity_scale,
                ..word.clone()
            }
        })
        .collect()
}

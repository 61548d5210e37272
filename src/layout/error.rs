use thiserror::Error;

/// Configuration rejected before any placement is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    CanvasSize { width: u32, height: u32 },

    #[error("minimum font size {min} is larger than maximum font size {max}")]
    FontRange { min: u32, max: u32 },

    #[error("font sizes must be positive")]
    ZeroFontSize,

    #[error("max words must be at least 1")]
    ZeroMaxWords,

    #[error("max attempts must be at least 1")]
    ZeroAttempts,

    #[error("opacity must be within 0..=1, got {0}")]
    Opacity(f32),

    #[error("{name} must be a finite, non-negative length, got {value}")]
    Spacing { name: &'static str, value: f32 },

    #[error("rotation must be finite, got {0}")]
    Rotation(f32),
}

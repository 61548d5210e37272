use crate::text_metrics;

use super::WordBox;

/// Supplies the rendered box of a word at a font size.
pub trait MetricsProvider {
    fn measure(&self, word: &str, font_size: f32) -> WordBox;
}

impl<F> MetricsProvider for F
where
    F: Fn(&str, f32) -> WordBox,
{
    fn measure(&self, word: &str, font_size: f32) -> WordBox {
        self(word, font_size)
    }
}

/// Measures against a system font, or the calibrated width table when
/// `fast` is set or no font can be loaded.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    pub font_family: String,
    pub fast: bool,
}

impl FontMetrics {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            fast: false,
        }
    }

    pub fn fast() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            fast: true,
        }
    }
}

impl MetricsProvider for FontMetrics {
    fn measure(&self, word: &str, font_size: f32) -> WordBox {
        if !self.fast
            && let Some(extent) = text_metrics::measure_text(word, font_size, &self.font_family)
        {
            // Glyph bounds are tighter than the em box; words without ink
            // (all spaces) fall back to the font size.
            let ink = extent.ascent + extent.descent;
            let height = if ink > 0.0 { ink } else { font_size };
            return WordBox::new(extent.width, height);
        }
        WordBox::new(fallback_text_width(word, font_size), font_size)
    }
}

pub fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

fn char_width_factor(ch: char) -> f32 {
    // Advance widths for a Helvetica-like sans face at 1px.
    match ch {
        ' ' => 0.278,
        '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.278,
        'i' | 'j' | 'l' => 0.222,
        'f' | 't' => 0.278,
        'r' => 0.333,
        'I' => 0.278,
        'm' => 0.833,
        'w' => 0.722,
        'M' => 0.833,
        'W' => 0.944,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 0.556,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.5,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 0.722,
        'F' | 'T' | 'Z' => 0.611,
        'G' | 'O' | 'Q' => 0.778,
        'J' => 0.5,
        'L' => 0.556,
        '0'..='9' => 0.556,
        _ if ch.is_ascii() => 0.556,
        // CJK and other wide scripts
        _ => 1.0,
    }
}

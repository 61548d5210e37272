use serde::{Deserialize, Serialize};

const RAINBOW: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];
const BLUE: [&str; 8] = [
    "#1E3A8A", "#3B82F6", "#60A5FA", "#93C5FD", "#DBEAFE", "#1D4ED8", "#2563EB", "#1E40AF",
];
const GREEN: [&str; 8] = [
    "#166534", "#16A34A", "#22C55E", "#4ADE80", "#86EFAC", "#15803D", "#16A34A", "#22C55E",
];
const RED: [&str; 8] = [
    "#991B1B", "#DC2626", "#EF4444", "#F87171", "#FECACA", "#B91C1C", "#DC2626", "#EF4444",
];
const PURPLE: [&str; 8] = [
    "#7C2D12", "#A855F7", "#C084FC", "#DDD6FE", "#F3E8FF", "#9333EA", "#A855F7", "#C084FC",
];
const ORANGE: [&str; 8] = [
    "#C2410C", "#EA580C", "#FB923C", "#FDBA74", "#FED7AA", "#D97706", "#EA580C", "#FB923C",
];
const NEON: [&str; 8] = [
    "#00FFFF", "#FF00FF", "#FFFF00", "#00FF00", "#FF0080", "#8000FF", "#FF8000", "#00FF80",
];
const GRADIENT: [&str; 6] = ["#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe"];
const MONOCHROME: [&str; 6] = ["#000000", "#333333", "#666666", "#999999", "#CCCCCC", "#FFFFFF"];

pub const PALETTE_NAMES: [&str; 9] = [
    "rainbow",
    "blue",
    "green",
    "red",
    "purple",
    "orange",
    "neon",
    "gradient",
    "monochrome",
];

/// Colors for a named scheme; unknown names get the rainbow set.
pub fn palette(name: &str) -> &'static [&'static str] {
    match name.trim().to_ascii_lowercase().as_str() {
        "blue" => &BLUE,
        "green" => &GREEN,
        "red" => &RED,
        "purple" => &PURPLE,
        "orange" => &ORANGE,
        "neon" => &NEON,
        "gradient" => &GRADIENT,
        "monochrome" => &MONOCHROME,
        _ => &RAINBOW,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_weight: String,
    pub background: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_weight: "normal".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_weight: "bold".to_string(),
            background: "#111827".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" | "default" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_palette_resolves() {
        for name in PALETTE_NAMES {
            assert!(!palette(name).is_empty(), "{name}");
        }
        assert_eq!(palette("blue")[0], "#1E3A8A");
        assert_eq!(palette("Neon")[1], "#FF00FF");
    }

    #[test]
    fn unknown_palette_falls_back_to_rainbow() {
        assert_eq!(palette("sepia"), &RAINBOW[..]);
    }

    #[test]
    fn theme_names() {
        assert_eq!(Theme::from_name("dark").map(|t| t.background), Some("#111827".to_string()));
        assert!(Theme::from_name("solarized").is_none());
    }
}

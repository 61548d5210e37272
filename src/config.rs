use crate::layout::{Canvas, LayoutError, LayoutStrategy};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub max_words: usize,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub color_scheme: String,
    pub strategy: LayoutStrategy,
    pub rotation: f32,
    pub opacity: f32,
    pub max_attempts: usize,
    pub collision_margin: f32,
    pub box_padding: f32,
    pub center_tolerance: f32,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            max_words: 100,
            min_font_size: 12,
            max_font_size: 60,
            color_scheme: "rainbow".to_string(),
            strategy: LayoutStrategy::Spiral,
            rotation: 0.0,
            opacity: 1.0,
            max_attempts: 1500,
            collision_margin: 10.0,
            box_padding: 8.0,
            center_tolerance: 20.0,
            seed: None,
        }
    }
}

impl LayoutConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(LayoutError::CanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.min_font_size == 0 || self.max_font_size == 0 {
            return Err(LayoutError::ZeroFontSize);
        }
        if self.min_font_size > self.max_font_size {
            return Err(LayoutError::FontRange {
                min: self.min_font_size,
                max: self.max_font_size,
            });
        }
        if self.max_words == 0 {
            return Err(LayoutError::ZeroMaxWords);
        }
        if self.max_attempts == 0 {
            return Err(LayoutError::ZeroAttempts);
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(LayoutError::Opacity(self.opacity));
        }
        if !self.rotation.is_finite() {
            return Err(LayoutError::Rotation(self.rotation));
        }
        for (name, value) in [
            ("box padding", self.box_padding),
            ("collision margin", self.collision_margin),
            ("center tolerance", self.center_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Spacing { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    pub min_word_length: usize,
    pub stemming: bool,
    pub extra_stop_words: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            stemming: true,
            extra_stop_words: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub text: TextConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            layout: LayoutConfig::default(),
            text: TextConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_weight: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    max_words: Option<usize>,
    min_font_size: Option<u32>,
    max_font_size: Option<u32>,
    color_scheme: Option<String>,
    layout: Option<String>,
    rotation: Option<f32>,
    opacity: Option<f32>,
    max_attempts: Option<usize>,
    collision_margin: Option<f32>,
    box_padding: Option<f32>,
    center_tolerance: Option<f32>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TextConfigFile {
    min_word_length: Option<usize>,
    stemming: Option<bool>,
    extra_stop_words: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    text: Option<TextConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };
    log::debug!("loaded config from {}", path.display());
    Ok(apply_config_file(Config::default(), parsed))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("unknown theme '{theme_name}', keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_weight {
            config.theme.font_weight = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.canvas_width {
            config.layout.canvas_width = v;
        }
        if let Some(v) = layout.canvas_height {
            config.layout.canvas_height = v;
        }
        if let Some(v) = layout.max_words {
            config.layout.max_words = v;
        }
        if let Some(v) = layout.min_font_size {
            config.layout.min_font_size = v;
        }
        if let Some(v) = layout.max_font_size {
            config.layout.max_font_size = v;
        }
        if let Some(v) = layout.color_scheme {
            config.layout.color_scheme = v;
        }
        if let Some(v) = layout.layout {
            config.layout.strategy = LayoutStrategy::from_token(&v);
        }
        if let Some(v) = layout.rotation {
            config.layout.rotation = v;
        }
        if let Some(v) = layout.opacity {
            config.layout.opacity = v;
        }
        if let Some(v) = layout.max_attempts {
            config.layout.max_attempts = v;
        }
        if let Some(v) = layout.collision_margin {
            config.layout.collision_margin = v;
        }
        if let Some(v) = layout.box_padding {
            config.layout.box_padding = v;
        }
        if let Some(v) = layout.center_tolerance {
            config.layout.center_tolerance = v;
        }
        if layout.seed.is_some() {
            config.layout.seed = layout.seed;
        }
    }

    if let Some(text) = parsed.text {
        if let Some(v) = text.min_word_length {
            config.text.min_word_length = v;
        }
        if let Some(v) = text.stemming {
            config.text.stemming = v;
        }
        if let Some(v) = text.extra_stop_words {
            config.text.extra_stop_words = v;
        }
    }

    if let Some(render) = parsed.render
        && let Some(v) = render.scale
    {
        config.render.scale = v;
    }

    config
}

pub mod animation;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod words;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, TextConfig, load_config};
pub use layout::{
    CloudLayout, FontMetrics, LayoutError, LayoutState, LayoutStrategy, MetricsProvider,
    PlacedWord, WordBox, WordFrequency, build_cloud, build_cloud_seeded, place_word,
};
pub use render::render_svg;
pub use theme::Theme;
pub use words::{WordStats, count_words, rank_words};

/// Everything needed to go from raw text to an SVG in one call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
    /// Skip system font lookup and use the built-in width table.
    pub fast_text: bool,
}

impl RenderOptions {
    pub fn with_theme(theme: Theme) -> Self {
        let mut options = Self::default();
        options.config.theme = theme;
        options
    }
}

pub fn layout_text(text: &str, options: &RenderOptions) -> anyhow::Result<CloudLayout> {
    let ranked = rank_words(count_words(text, &options.config.text));
    let metrics = if options.fast_text {
        FontMetrics::fast()
    } else {
        FontMetrics::new(options.config.theme.font_family.clone())
    };
    Ok(build_cloud_seeded(&ranked, &options.config.layout, &metrics)?)
}

pub fn render_with_options(text: &str, options: RenderOptions) -> anyhow::Result<String> {
    let layout = layout_text(text, &options)?;
    Ok(render_svg(&layout, &options.config.theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_text_end_to_end() {
        let mut options = RenderOptions {
            fast_text: true,
            ..RenderOptions::default()
        };
        options.config.layout.seed = Some(3);
        let svg = render_with_options("rust cloud rust words cloud rust", options).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">rust<"));
        assert!(svg.contains(">cloud<"));
    }

    #[test]
    fn seeded_layouts_repeat() {
        let mut options = RenderOptions::with_theme(Theme::dark());
        options.fast_text = true;
        options.config.layout.seed = Some(5);
        options.config.layout.strategy = LayoutStrategy::Random;
        let text = "alpha beta gamma alpha beta alpha delta";
        let first = layout_text(text, &options).unwrap();
        let second = layout_text(text, &options).unwrap();
        assert_eq!(first.words, second.words);
        assert_eq!(options.config.theme.background, Theme::dark().background);
    }
}

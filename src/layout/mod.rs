mod collision;
mod error;
pub mod metrics;
mod placement;
pub mod position;
pub(crate) mod types;
pub use collision::CollisionIndex;
pub use error::LayoutError;
pub use metrics::{FontMetrics, MetricsProvider};
pub use placement::{LayoutState, place_word};
pub use position::{Canvas, LayoutStrategy};
pub use types::*;

use crate::config::LayoutConfig;
use crate::theme::palette;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lays out `words` on the configured canvas.
///
/// Words are ranked by descending count (stable, so ties keep their input
/// order) and truncated to `max_words`. The first word that cannot be
/// placed ends the build; everything placed before it is returned.
pub fn build_cloud<R: Rng + ?Sized>(
    words: &[WordFrequency],
    config: &LayoutConfig,
    metrics: &dyn MetricsProvider,
    rng: &mut R,
) -> Result<CloudLayout, LayoutError> {
    config.validate()?;
    let mut state = LayoutState::new(config);

    let ranked = rank_for_layout(words, config.max_words);
    let Some(max_count) = ranked.first().map(|entry| entry.count) else {
        log::debug!("no words to lay out");
        return Ok(state.into_layout());
    };

    let colors = palette(&config.color_scheme);
    for (rank, entry) in ranked.iter().enumerate() {
        let font_size = font_size_for(
            entry.count,
            max_count,
            config.min_font_size,
            config.max_font_size,
        );
        let color = colors[rng.gen_range(0..colors.len())];
        if place_word(&mut state, &entry.word, font_size, color, config, metrics, rng).is_none() {
            log::debug!(
                "canvas saturated at '{}' (rank {}), placed {} of {}",
                entry.word,
                rank + 1,
                state.len(),
                ranked.len()
            );
            break;
        }
    }

    Ok(state.into_layout())
}

/// `build_cloud` with a `StdRng` seeded from `config.seed`, or from
/// entropy when no seed is set.
pub fn build_cloud_seeded(
    words: &[WordFrequency],
    config: &LayoutConfig,
    metrics: &dyn MetricsProvider,
) -> Result<CloudLayout, LayoutError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_cloud(words, config, metrics, &mut rng)
}

/// Linear map of `count / max_count` onto the font range, rounded to
/// whole pixels.
pub fn font_size_for(count: u32, max_count: u32, min_font_size: u32, max_font_size: u32) -> f32 {
    let ratio = if max_count == 0 {
        0.0
    } else {
        count as f32 / max_count as f32
    };
    let min = min_font_size as f32;
    let max = max_font_size as f32;
    (min + (max - min) * ratio).round()
}

fn rank_for_layout(words: &[WordFrequency], max_words: usize) -> Vec<&WordFrequency> {
    let mut ranked: Vec<&WordFrequency> = words.iter().filter(|entry| entry.count > 0).collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(max_words);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_metrics(word: &str, font_size: f32) -> WordBox {
        WordBox::new(word.chars().count() as f32 * font_size * 0.6, font_size)
    }

    fn words(entries: &[(&str, u32)]) -> Vec<WordFrequency> {
        entries
            .iter()
            .map(|(word, count)| WordFrequency::new(*word, *count))
            .collect()
    }

    fn config(strategy: LayoutStrategy) -> LayoutConfig {
        LayoutConfig {
            strategy,
            min_font_size: 12,
            max_font_size: 48,
            ..LayoutConfig::default()
        }
    }

    fn build(words: &[WordFrequency], config: &LayoutConfig) -> CloudLayout {
        let mut rng = StdRng::seed_from_u64(42);
        build_cloud(words, config, &block_metrics, &mut rng).expect("valid config")
    }

    #[test]
    fn font_size_matches_linear_map() {
        assert_eq!(font_size_for(10, 10, 12, 48), 48.0);
        assert_eq!(font_size_for(5, 10, 12, 48), 30.0);
        assert_eq!(font_size_for(1, 10, 12, 48), 16.0);
        assert_eq!(font_size_for(3, 3, 20, 20), 20.0);
    }

    #[test]
    fn grid_scenario_places_all_three() {
        let input = words(&[("alpha", 10), ("beta", 5), ("gamma", 1)]);
        let layout = build(&input, &config(LayoutStrategy::Grid));
        assert_eq!(layout.len(), 3);
        let sizes: Vec<f32> = layout.words.iter().map(|w| w.font_size).collect();
        assert_eq!(sizes, vec![48.0, 30.0, 16.0]);
        let names: Vec<&str> = layout.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let input = words(&[("low", 1), ("tie_a", 4), ("top", 9), ("tie_b", 4)]);
        let ranked: Vec<&str> = rank_for_layout(&input, 10)
            .into_iter()
            .map(|entry| entry.word.as_str())
            .collect();
        assert_eq!(ranked, vec!["top", "tie_a", "tie_b", "low"]);
    }

    #[test]
    fn max_words_caps_output() {
        let input = words(&[("one", 5), ("two", 4), ("three", 3), ("four", 2), ("five", 1)]);
        let mut config = config(LayoutStrategy::Spiral);
        config.max_words = 2;
        let layout = build(&input, &config);
        assert!(layout.len() <= 2);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let layout = build(&[], &config(LayoutStrategy::Spiral));
        assert!(layout.is_empty());
        assert_eq!((layout.width, layout.height), (800.0, 600.0));
    }

    #[test]
    fn tiny_canvas_yields_empty_layout() {
        let input = words(&[("wordcloud", 3)]);
        let mut config = config(LayoutStrategy::Random);
        config.canvas_width = 20;
        config.canvas_height = 20;
        let layout = build(&input, &config);
        assert!(layout.is_empty());
    }

    #[test]
    fn invalid_font_range_is_rejected() {
        let mut config = config(LayoutStrategy::Grid);
        config.min_font_size = 60;
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_cloud(&words(&[("a", 1)]), &config, &block_metrics, &mut rng).unwrap_err();
        assert_eq!(err, LayoutError::FontRange { min: 60, max: 48 });
    }

    #[test]
    fn negative_padding_is_rejected_before_placement() {
        let mut config = config(LayoutStrategy::Spiral);
        config.box_padding = -200.0;
        let mut rng = StdRng::seed_from_u64(1);
        let input = words(&[("alpha", 5), ("beta", 2)]);
        let err = build_cloud(&input, &config, &block_metrics, &mut rng).unwrap_err();
        assert!(matches!(err, LayoutError::Spacing { name: "box padding", .. }));
    }

    #[test]
    fn first_failure_stops_the_build() {
        // "xx" fits, the long word does not, "yy" would fit but must not appear.
        let input = words(&[("xx", 3), ("muchtoolongforthiscanvas", 2), ("yy", 1)]);
        let mut config = config(LayoutStrategy::Spiral);
        config.canvas_width = 200;
        config.canvas_height = 200;
        config.min_font_size = 20;
        config.max_font_size = 20;
        let layout = build(&input, &config);
        let names: Vec<&str> = layout.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["xx"]);
    }

    #[test]
    fn deterministic_strategies_rebuild_identically() {
        let input = words(&[("rust", 8), ("cloud", 6), ("layout", 4), ("grid", 2), ("word", 1)]);
        for strategy in [
            LayoutStrategy::Spiral,
            LayoutStrategy::Grid,
            LayoutStrategy::Circular,
        ] {
            let config = config(strategy);
            let mut first_rng = StdRng::seed_from_u64(1);
            let mut second_rng = StdRng::seed_from_u64(99);
            let first = build_cloud(&input, &config, &block_metrics, &mut first_rng).unwrap();
            let second = build_cloud(&input, &config, &block_metrics, &mut second_rng).unwrap();
            let geometry = |layout: &CloudLayout| -> Vec<(f32, f32, f32, f32)> {
                layout
                    .words
                    .iter()
                    .map(|w| (w.x, w.y, w.width, w.height))
                    .collect()
            };
            assert_eq!(geometry(&first), geometry(&second), "{strategy:?}");
        }
    }

    #[test]
    fn seeded_build_is_reproducible_for_random() {
        let input = words(&[("seed", 5), ("random", 3), ("cloud", 2)]);
        let mut config = config(LayoutStrategy::Random);
        config.seed = Some(7);
        let first = build_cloud_seeded(&input, &config, &block_metrics).unwrap();
        let second = build_cloud_seeded(&input, &config, &block_metrics).unwrap();
        assert_eq!(first, second);
    }
}

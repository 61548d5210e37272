use crate::animation::{AnimationKind, animation_delays};
use crate::config::{Config, load_config};
use crate::layout::{FontMetrics, LayoutStrategy, build_cloud};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_frame_svg, render_svg, write_output_svg};
use crate::words::{WordStats, count_words, rank_words};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wcloud", version, about = "Word-frequency cloud renderer")]
pub struct Args {
    /// Input text file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON or JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    #[arg(long = "max-words")]
    pub max_words: Option<usize>,

    #[arg(long = "min-font")]
    pub min_font_size: Option<u32>,

    #[arg(long = "max-font")]
    pub max_font_size: Option<u32>,

    /// Color scheme (rainbow, blue, green, red, purple, orange, neon, gradient, monochrome)
    #[arg(long = "scheme")]
    pub color_scheme: Option<String>,

    /// Layout strategy (random, spiral, grid, circular)
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<String>,

    /// Rotation applied to every word, in degrees
    #[arg(long = "rotation", allow_hyphen_values = true)]
    pub rotation: Option<f32>,

    #[arg(long = "opacity")]
    pub opacity: Option<f32>,

    /// Seed for colors and random placement
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Font family used for measuring and rendering
    #[arg(long = "font")]
    pub font_family: Option<String>,

    /// Use built-in character widths instead of system fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Render one animation frame (bounce, spiral, fade)
    #[arg(long = "animate")]
    pub animate: Option<String>,

    /// Frame time in milliseconds for --animate
    #[arg(long = "time", default_value_t = 0.0)]
    pub time_ms: f32,

    /// Print word statistics to stderr
    #[arg(long = "stats")]
    pub stats: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let _ = env_logger::try_init();
    let args = Args::parse();
    let config = apply_args(load_config(args.config.as_deref())?, &args);

    let input = read_input(args.input.as_deref())?;
    let ranked = rank_words(count_words(&input, &config.text));
    if ranked.is_empty() {
        return Err(anyhow::anyhow!("No words found in input"));
    }
    log::info!(
        "{} unique words, laying out up to {} with {} layout",
        ranked.len(),
        config.layout.max_words,
        config.layout.strategy.name()
    );

    if args.stats {
        let considered = &ranked[..ranked.len().min(config.layout.max_words)];
        eprint!("{}", WordStats::from_ranked(considered));
    }

    let metrics = if args.fast_text {
        FontMetrics::fast()
    } else {
        FontMetrics::new(config.theme.font_family.clone())
    };
    let mut rng = match config.layout.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let layout = build_cloud(&ranked, &config.layout, &metrics, &mut rng)?;
    log::info!("placed {} words", layout.len());
    if layout.is_empty() {
        log::warn!("no words fit the canvas");
    }

    if let OutputFormat::Json = args.output_format {
        return write_layout_dump(args.output.as_deref(), &layout, &config.layout);
    }

    let svg = match args.animate.as_deref().map(AnimationKind::from_token) {
        Some(kind) if kind != AnimationKind::None => {
            let delays = animation_delays(layout.len(), &mut rng);
            render_frame_svg(&layout, &config.theme, kind, args.time_ms, &delays)
        }
        _ => render_svg(&layout, &config.theme),
    };

    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref()),
        OutputFormat::Png => write_png(&svg, &args, &config),
        OutputFormat::Json => Ok(()),
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, args: &Args, config: &Config) -> Result<()> {
    let output = ensure_output(&args.output, "png")?;
    crate::render::write_output_png(svg, &output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _args: &Args, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(v) = args.width {
        config.layout.canvas_width = v;
    }
    if let Some(v) = args.height {
        config.layout.canvas_height = v;
    }
    if let Some(v) = args.max_words {
        config.layout.max_words = v;
    }
    if let Some(v) = args.min_font_size {
        config.layout.min_font_size = v;
    }
    if let Some(v) = args.max_font_size {
        config.layout.max_font_size = v;
    }
    if let Some(v) = &args.color_scheme {
        config.layout.color_scheme = v.clone();
    }
    if let Some(v) = &args.layout {
        config.layout.strategy = LayoutStrategy::from_token(v);
    }
    if let Some(v) = args.rotation {
        config.layout.rotation = v;
    }
    if let Some(v) = args.opacity {
        config.layout.opacity = v;
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }
    if let Some(v) = &args.font_family {
        config.theme.font_family = v.clone();
    }
    config
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

use crate::animation::{AnimationKind, frame_words};
use crate::layout::{CloudLayout, PlacedWord};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &CloudLayout, theme: &Theme) -> String {
    render_words(layout.width, layout.height, &layout.words, theme)
}

/// Renders the cloud as it appears `time_ms` into an animation.
pub fn render_frame_svg(
    layout: &CloudLayout,
    theme: &Theme,
    kind: AnimationKind,
    time_ms: f32,
    delays: &[f32],
) -> String {
    let words = frame_words(layout, kind, time_ms, delays);
    render_words(layout.width, layout.height, &words, theme)
}

fn render_words(width: f32, height: f32, words: &[PlacedWord], theme: &Theme) -> String {
    let mut svg = String::new();
    let width = width.max(1.0);
    let height = height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str(&format!(
        "<g font-family=\"{}\" font-weight=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">",
        escape_xml(&theme.font_family),
        escape_xml(&theme.font_weight)
    ));
    for word in words {
        svg.push_str(&word_svg(word));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn word_svg(word: &PlacedWord) -> String {
    // Rotate about the box center, as the canvas renderer does.
    let (cx, cy) = word.center();
    let mut transform = format!("translate({cx:.2} {cy:.2})");
    if word.rotation != 0.0 {
        transform.push_str(&format!(" rotate({:.2})", word.rotation));
    }
    let opacity = if word.opacity < 1.0 {
        format!(" fill-opacity=\"{:.3}\"", word.opacity.max(0.0))
    } else {
        String::new()
    };
    format!(
        "<text transform=\"{transform}\" font-size=\"{}\" fill=\"{}\"{opacity}>{}</text>",
        word.font_size,
        escape_xml(&word.color),
        escape_xml(&word.word)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = if render_cfg.scale > 0.0 { render_cfg.scale } else { 1.0 };
    let size = tree.size().to_int_size();
    let width = ((size.width() as f32) * scale).ceil() as u32;
    let height = ((size.height() as f32) * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {width}x{height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

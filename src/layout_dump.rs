use crate::config::LayoutConfig;
use crate::layout::{CloudLayout, PlacedWord};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub strategy: String,
    pub color_scheme: String,
    pub width: f32,
    pub height: f32,
    pub placed: usize,
    pub words: Vec<PlacedWord>,
}

impl LayoutDump {
    pub fn from_layout(layout: &CloudLayout, config: &LayoutConfig) -> Self {
        LayoutDump {
            strategy: config.strategy.name().to_string(),
            color_scheme: config.color_scheme.clone(),
            width: layout.width,
            height: layout.height,
            placed: layout.len(),
            words: layout.words.clone(),
        }
    }
}

/// Pretty JSON to `path`, or stdout when no path is given.
pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &CloudLayout,
    config: &LayoutConfig,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, config);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

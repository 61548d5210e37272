use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Mutex;
use ttf_parser::{Face, GlyphId};

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width plus ink extent above and below the baseline, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

pub fn measure_text(text: &str, font_size: f32, font_family: &str) -> Option<TextExtent> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(TextExtent::default());
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<TextExtent> {
        let family_key = normalize_family_key(font_family);
        if !self.cache.contains_key(&family_key) {
            let face = self.load_face(font_family, &family_key);
            if face.is_none() {
                log::warn!("no usable font for '{family_key}', using fallback widths");
            }
            self.cache.insert(family_key.clone(), face);
        }
        let face = self.cache.get_mut(&family_key)?.as_mut()?;
        face.measure(text, font_size)
    }

    fn load_face(&mut self, font_family: &str, family_key: &str) -> Option<FontFace> {
        if let Some(face) = load_cached_face(family_key) {
            return Some(face);
        }

        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| generic_family(*name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                let face = FontFace::load(data.to_vec(), index)?;
                if let Some((font_path, meta_path)) = cache_paths(family_key)
                    && !font_path.exists()
                {
                    if let Some(parent) = font_path.parent() {
                        let _ = fs::create_dir_all(parent);
                    }
                    let _ = fs::write(&font_path, &face.data);
                    let _ = fs::write(&meta_path, index.to_string());
                }
                Some(face)
            })
            .flatten()
    }
}

fn generic_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

#[derive(Debug, Clone, Copy)]
struct GlyphMetrics {
    advance: u16,
    y_min: i16,
    y_max: i16,
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    glyphs: HashMap<char, Option<GlyphMetrics>>,
}

impl FontFace {
    fn load(data: Vec<u8>, index: u32) -> Option<Self> {
        let units_per_em = Face::parse(&data, index).ok()?.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            glyphs: HashMap::new(),
        })
    }

    fn measure(&mut self, text: &str, font_size: f32) -> Option<TextExtent> {
        let scale = font_size / self.units_per_em as f32;
        let fallback_advance = font_size * 0.56;
        let mut face: Option<Face<'_>> = None;
        let mut extent = TextExtent::default();
        let mut y_min = 0i16;
        let mut y_max = 0i16;

        for ch in text.chars().filter(|ch| *ch != '\n') {
            let metrics = match self.glyphs.get(&ch) {
                Some(cached) => *cached,
                None => {
                    if face.is_none() {
                        face = Some(Face::parse(&self.data, self.index).ok()?);
                    }
                    let parsed = face.as_ref()?;
                    let metrics = parsed.glyph_index(ch).map(|id| glyph_metrics(parsed, id));
                    self.glyphs.insert(ch, metrics);
                    metrics
                }
            };
            let Some(metrics) = metrics else {
                extent.width += fallback_advance;
                continue;
            };
            extent.width += metrics.advance as f32 * scale;
            y_min = y_min.min(metrics.y_min);
            y_max = y_max.max(metrics.y_max);
        }

        extent.width = extent.width.max(0.0);
        extent.ascent = y_max as f32 * scale;
        extent.descent = -(y_min as f32) * scale;
        Some(extent)
    }
}

fn glyph_metrics(face: &Face<'_>, id: GlyphId) -> GlyphMetrics {
    let advance = face.glyph_hor_advance(id).unwrap_or(0);
    let (y_min, y_max) = face
        .glyph_bounding_box(id)
        .map(|rect| (rect.y_min, rect.y_max))
        .unwrap_or((0, 0));
    GlyphMetrics {
        advance,
        y_min,
        y_max,
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

fn cache_paths(family_key: &str) -> Option<(PathBuf, PathBuf)> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    family_key.hash(&mut hasher);
    let hash = hasher.finish();
    let dir = base.join("wcloud").join("font-cache");
    Some((dir.join(format!("{hash:x}.font")), dir.join(format!("{hash:x}.meta"))))
}

fn load_cached_face(family_key: &str) -> Option<FontFace> {
    let (font_path, meta_path) = cache_paths(family_key)?;
    if !font_path.exists() || !meta_path.exists() {
        return None;
    }
    let bytes = fs::read(font_path).ok()?;
    let index: u32 = fs::read_to_string(meta_path).ok()?.trim().parse().ok()?;
    FontFace::load(bytes, index)
}

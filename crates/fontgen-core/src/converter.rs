//! Glyph rasterization.
//!
//! [`GlyphConverter`] is the seam between the header generator and whatever
//! produces glyph pixels. [`FontdueConverter`] implements it for TrueType and
//! OpenType fonts using `fontdue`.

use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::bitmap::GlyphBitmap;
use crate::error::FontError;

/// Coverage at or above this value is a set pixel.
const COVERAGE_THRESHOLD: u8 = 128;

/// Pixel size used to sample the font's vertical metrics.
const REFERENCE_PX: f32 = 1000.0;

/// Produces fixed-size glyph bitmaps for character codes 0-255.
pub trait GlyphConverter {
    /// Name of the font being converted.
    fn font_name(&self) -> &str;

    /// Cell height in pixels.
    fn pixel_height(&self) -> u32;

    /// Cell width in pixels.
    fn pixel_width(&self) -> u32;

    /// Size this converter was created for. Defaults to the cell height.
    fn requested_size(&self) -> u32 {
        self.pixel_height()
    }

    /// Rasterizes one character code into a `pixel_width` x `pixel_height` cell.
    fn convert_character(&self, code: u8) -> Result<GlyphBitmap, FontError>;
}

/// [`GlyphConverter`] backed by a `fontdue` font.
///
/// The font is scaled so that its line height (ascent minus descent) equals
/// the requested size. Character codes map to `U+0000..=U+00FF`.
pub struct FontdueConverter {
    font: Font,
    name: String,
    size: u32,
    scale: f32,
    baseline: i32,
    width: u32,
}

impl FontdueConverter {
    /// Loads a font file and prepares it for rasterization at `size` pixels.
    pub fn open(path: impl AsRef<Path>, size: u32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FontError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();

        Self::from_bytes(&bytes, size, &fallback_name).map_err(|e| match e {
            FontError::FontLoad { reason, .. } => FontError::FontLoad {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parses font data already in memory.
    ///
    /// `fallback_name` is used when the font carries no name of its own.
    pub fn from_bytes(bytes: &[u8], size: u32, fallback_name: &str) -> Result<Self, FontError> {
        if size == 0 {
            return Err(FontError::Configuration(
                "pixel size must be greater than zero".to_string(),
            ));
        }

        let settings = FontSettings {
            scale: size as f32,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|reason| FontError::FontLoad {
            path: fallback_name.into(),
            reason: reason.to_string(),
        })?;

        let name = font
            .name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(fallback_name)
            .to_string();

        // Fonts without horizontal metrics are treated as all-ascent.
        let (ascent, descent) = font
            .horizontal_line_metrics(REFERENCE_PX)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((REFERENCE_PX, 0.0));
        let line_height = ascent - descent;
        if line_height.is_nan() || line_height <= 0.0 {
            return Err(FontError::FontLoad {
                path: fallback_name.into(),
                reason: "font reports a non-positive line height".to_string(),
            });
        }

        let scale = size as f32 * REFERENCE_PX / line_height;
        let baseline = (ascent * scale / REFERENCE_PX).round() as i32;
        let width = cell_width(&font, scale);

        Ok(Self {
            font,
            name,
            size,
            scale,
            baseline,
            width,
        })
    }

    /// Replaces the font name reported by [`GlyphConverter::font_name`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pixels per em passed to `fontdue` when rasterizing.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Row of the baseline inside the cell, counted from the top.
    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    fn rasterization_error(&self, code: u8, reason: impl Into<String>) -> FontError {
        FontError::Rasterization {
            font: self.name.clone(),
            size: self.size,
            code,
            reason: reason.into(),
        }
    }
}

impl GlyphConverter for FontdueConverter {
    fn font_name(&self) -> &str {
        &self.name
    }

    fn pixel_height(&self) -> u32 {
        self.size
    }

    fn pixel_width(&self) -> u32 {
        self.width
    }

    fn requested_size(&self) -> u32 {
        self.size
    }

    fn convert_character(&self, code: u8) -> Result<GlyphBitmap, FontError> {
        let mut cell = GlyphBitmap::new(self.width, self.size);
        let c = char::from(code);

        // Codes the font does not cover stay blank instead of showing .notdef
        if self.font.lookup_glyph_index(c) == 0 {
            return Ok(cell);
        }

        let (metrics, coverage) = self.font.rasterize(c, self.scale);
        if coverage.len() != metrics.width * metrics.height {
            return Err(self.rasterization_error(
                code,
                format!(
                    "coverage has {} samples, expected {}x{}",
                    coverage.len(),
                    metrics.width,
                    metrics.height
                ),
            ));
        }

        let top = self.baseline - (metrics.ymin + metrics.height as i32);
        for (row, samples) in coverage.chunks(metrics.width.max(1)).enumerate() {
            let y = top + row as i32;
            if y < 0 {
                continue;
            }
            for (col, &sample) in samples.iter().enumerate() {
                let x = metrics.xmin + col as i32;
                if x >= 0 && sample >= COVERAGE_THRESHOLD {
                    cell.set(x as u32, y as u32, true);
                }
            }
        }

        Ok(cell)
    }
}

/// Widest advance over all covered character codes, at least one pixel.
fn cell_width(font: &Font, scale: f32) -> u32 {
    (0..=u8::MAX)
        .map(char::from)
        .filter(|&c| font.lookup_glyph_index(c) != 0)
        .map(|c| font.metrics(c, scale).advance_width.ceil() as u32)
        .max()
        .unwrap_or(0)
        .max(1)
}

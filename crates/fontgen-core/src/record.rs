//! One font at one pixel size.

use crate::bitmap::{byte_stride, GlyphBitmap};
use crate::config::MAX_PIXEL_SIZE;
use crate::converter::GlyphConverter;
use crate::error::FontError;

/// Number of character codes in every lookup table.
pub const GLYPH_COUNT: usize = 256;

/// Widest cell the 16-bit `width` field of the generated `Table` can hold.
pub const MAX_CELL_WIDTH: u32 = u16::MAX as u32;

/// Metrics and the 256 glyph bitmaps of a font at a single size.
///
/// Created with empty placeholders; [`FontRecord::convert`] fills the
/// metadata and every glyph in place.
pub struct FontRecord {
    converter: Box<dyn GlyphConverter>,
    name: String,
    pixel_height: u32,
    pixel_width: u32,
    byte_stride: u32,
    glyphs: Vec<GlyphBitmap>,
    converted: bool,
}

impl FontRecord {
    /// Creates an unconverted record bound to `converter`.
    pub fn new(converter: Box<dyn GlyphConverter>) -> Self {
        Self {
            converter,
            name: String::new(),
            pixel_height: 0,
            pixel_width: 0,
            byte_stride: 0,
            glyphs: vec![GlyphBitmap::default(); GLYPH_COUNT],
            converted: false,
        }
    }

    /// Copies the converter metrics and rasterizes codes 0 through 255.
    ///
    /// Fails on the first glyph that cannot be produced or does not fit the
    /// reported cell; the record is then left unconverted.
    pub fn convert(&mut self) -> Result<(), FontError> {
        self.converted = false;
        self.name = self.converter.font_name().to_string();
        self.pixel_height = self.converter.pixel_height();
        self.pixel_width = self.converter.pixel_width();
        self.byte_stride = byte_stride(self.pixel_height);

        if self.pixel_width > MAX_CELL_WIDTH || self.pixel_height > MAX_PIXEL_SIZE {
            return Err(FontError::Configuration(format!(
                "{}px cell of '{}' is {}x{} px, tables hold at most {}x{} px",
                self.converter.requested_size(),
                self.name,
                self.pixel_width,
                self.pixel_height,
                MAX_CELL_WIDTH,
                MAX_PIXEL_SIZE
            )));
        }

        for code in 0..=u8::MAX {
            let glyph = self.converter.convert_character(code)?;
            if glyph.width() != self.pixel_width || glyph.height() != self.pixel_height {
                return Err(FontError::Rasterization {
                    font: self.name.clone(),
                    size: self.converter.requested_size(),
                    code,
                    reason: format!(
                        "glyph is {}x{}, expected {}x{}",
                        glyph.width(),
                        glyph.height(),
                        self.pixel_width,
                        self.pixel_height
                    ),
                });
            }
            self.glyphs[code as usize] = glyph;
        }

        self.converted = true;
        Ok(())
    }

    /// Font name, empty before conversion.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Bytes per glyph column, `ceil(pixel_height / 8)`.
    pub fn byte_stride(&self) -> u32 {
        self.byte_stride
    }

    /// Size the record was requested at.
    pub fn requested_size(&self) -> u32 {
        self.converter.requested_size()
    }

    /// Glyph for a character code.
    pub fn glyph(&self, code: u8) -> &GlyphBitmap {
        &self.glyphs[code as usize]
    }

    /// All 256 glyphs, indexed by character code.
    pub fn glyphs(&self) -> &[GlyphBitmap] {
        &self.glyphs
    }

    pub fn is_converted(&self) -> bool {
        self.converted
    }
}

impl std::fmt::Debug for FontRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRecord")
            .field("name", &self.name)
            .field("pixel_height", &self.pixel_height)
            .field("pixel_width", &self.pixel_width)
            .field("byte_stride", &self.byte_stride)
            .field("converted", &self.converted)
            .finish_non_exhaustive()
    }
}

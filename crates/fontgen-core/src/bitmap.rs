//! Column-packed glyph bitmaps.
//!
//! Glyphs are stored the way the OTOS display drivers consume them: one column
//! at a time, each column split into 8-row pages. Bit 0 of a page byte is the
//! topmost row of that page.

/// Number of bytes needed to store one column of `height` pixels.
pub fn byte_stride(height: u32) -> u32 {
    height.div_ceil(8)
}

/// Bitmap of a single glyph, packed column by column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GlyphBitmap {
    /// Creates a blank bitmap of the given cell size.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * byte_stride(height)) as usize;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Builds a bitmap from row strings, `#` or `@` marking set pixels.
    ///
    /// All rows are padded to the longest one.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' || c == '@' {
                    bitmap.set(x as u32, y as u32, true);
                }
            }
        }
        bitmap
    }

    /// Cell width in pixels (number of columns).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cell height in pixels (number of rows).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per column.
    pub fn stride(&self) -> u32 {
        byte_stride(self.height)
    }

    /// True for the zero-sized placeholder.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sets or clears a pixel. Out-of-cell coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.data[index] |= mask;
            } else {
                self.data[index] &= !mask;
            }
        }
    }

    /// Returns whether a pixel is set. Out-of-cell coordinates read as unset.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.locate(x, y)
            .map(|(index, mask)| self.data[index] & mask != 0)
            .unwrap_or(false)
    }

    /// The packed glyph, `width * stride` bytes, column-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of set pixels.
    pub fn ink(&self) -> u32 {
        self.data.iter().map(|b| b.count_ones()).sum()
    }

    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (x * self.stride() + y / 8) as usize;
        Some((index, 1 << (y % 8)))
    }
}

impl std::fmt::Display for GlyphBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty glyph)");
        }

        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) { "█" } else { "·" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

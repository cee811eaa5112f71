//! fontgen core
//!
//! Converts TrueType/OpenType fonts into C++ lookup table headers for the OTOS
//! embedded graphics library. Every header holds one table per pixel size;
//! each table stores the 256 glyphs of character codes 0-255 as
//! column-packed bytes.
//!
//! # Example
//!
//! ```no_run
//! use fontgen_core::{FontSet, GeneratorInfo};
//!
//! let mut set = FontSet::open("fonts/Arial.ttf", &[12, 16])?;
//! set.convert()?;
//! let summary = set.export("include/fonts", &GeneratorInfo::default())?;
//! println!("wrote {} ({})", summary.path.display(), summary.hash);
//! # Ok::<(), fontgen_core::FontError>(())
//! ```
//!
//! # Determinism
//!
//! Given the same font file, sizes and [`GeneratorInfo`], the generated header
//! is byte-identical across runs. Headers are written atomically: a failed
//! export never leaves a partial file behind.

pub mod bitmap;
pub mod config;
pub mod converter;
pub mod error;
pub mod header;
pub mod record;
pub mod set;

// Re-export main types for convenience
pub use bitmap::{byte_stride, GlyphBitmap};
pub use config::{
    validate_sizes, FontJob, FontJobEntry, GeneratorInfo, DEFAULT_BANNER, MAX_PIXEL_SIZE,
};
pub use converter::{FontdueConverter, GlyphConverter};
pub use error::FontError;
pub use header::{c_identifier, render_font_set, HeaderWriter};
pub use record::{FontRecord, GLYPH_COUNT, MAX_CELL_WIDTH};
pub use set::{ExportSummary, FontSet};

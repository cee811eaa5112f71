//! Error types for font loading, rasterization and header export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a font into a lookup table header.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font source could not be read or parsed.
    #[error("Failed to load font '{}': {reason}", .path.display())]
    FontLoad {
        /// Path of the font source.
        path: PathBuf,
        /// Reason reported by the loader.
        reason: String,
    },

    /// A glyph could not be produced for a character code.
    #[error("Failed to rasterize character 0x{code:02X} of font '{font}' at {size}px: {reason}")]
    Rasterization {
        /// Font name (or source path before the name is known).
        font: String,
        /// Requested pixel size.
        size: u32,
        /// Character code that failed.
        code: u8,
        /// What went wrong.
        reason: String,
    },

    /// Invalid size list or an inconsistent font set.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The output directory or header file could not be written.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FontError {
    /// Creates an [`FontError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FontError::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the stable error code for reporting (e.g., "FONT_001").
    pub fn code(&self) -> &'static str {
        match self {
            FontError::FontLoad { .. } => "FONT_001",
            FontError::Rasterization { .. } => "FONT_002",
            FontError::Configuration(_) => "FONT_003",
            FontError::Io { .. } => "FONT_004",
        }
    }

    /// Get the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            FontError::FontLoad { .. } | FontError::Rasterization { .. } => "font",
            FontError::Configuration(_) => "config",
            FontError::Io { .. } => "io",
        }
    }
}

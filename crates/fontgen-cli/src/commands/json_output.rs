//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag of `generate` and `batch`.

use fontgen_core::{ExportSummary, FontError};
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures. Library errors keep their own
/// `FONT_XXX` codes.
pub mod error_codes {
    /// Anything that is not a [`fontgen_core::FontError`]
    pub const INTERNAL: &str = "CLI_001";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "FONT_001", "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Font file the error belongs to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the font file for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Converts an error chain, keeping the library's error code when the
    /// root cause is a [`FontError`].
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<FontError>())
            .map(FontError::code)
            .unwrap_or(error_codes::INTERNAL);
        Self::new(code, format!("{:#}", err))
    }
}

/// One exported header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedHeader {
    /// Font name written into the header
    pub font_name: String,
    /// Path of the header file
    pub path: String,
    /// BLAKE3 hash of the header
    pub hash: String,
    /// Header size in bytes
    pub bytes: usize,
    /// Tables in header order
    pub tables: Vec<GeneratedTable>,
}

/// One lookup table of a header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedTable {
    /// Glyph width in pixels
    pub width: u32,
    /// Glyph height in pixels
    pub height: u32,
}

impl GeneratedHeader {
    pub fn new(font_name: &str, summary: &ExportSummary) -> Self {
        Self {
            font_name: font_name.to_string(),
            path: summary.path.display().to_string(),
            hash: summary.hash.clone(),
            bytes: summary.bytes,
            tables: summary
                .tables
                .iter()
                .map(|&(width, height)| GeneratedTable { width, height })
                .collect(),
        }
    }
}

/// JSON output for the `generate` and `batch` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether every header was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Headers written before any error
    pub headers: Vec<GeneratedHeader>,
}

impl GenerateOutput {
    /// Creates a successful output.
    pub fn success(headers: Vec<GeneratedHeader>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            headers,
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, headers: Vec<GeneratedHeader>) -> Self {
        Self {
            success: false,
            errors,
            headers,
        }
    }

    /// Pretty JSON, or a minimal error document if serialization fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"errors":[{{"code":"{}","message":"failed to serialize output: {}"}}],"headers":[]}}"#,
                error_codes::JSON_SERIALIZE,
                e.to_string().replace('"', "'")
            )
        })
    }
}

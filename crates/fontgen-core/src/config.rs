//! Generator identity and batch job files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FontError;

/// License banner written at the top of every generated header.
pub const DEFAULT_BANNER: &str = "\
/**
 * OTOS - Open Tec Operating System
 * Copyright (c) the OTOS contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
";

/// Identity of the generator, stamped into every header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    /// Generator name shown in the autogeneration warning.
    pub name: String,
    /// Semantic version shown in the autogeneration warning.
    pub version: String,
    /// License banner, written verbatim.
    pub banner: String,
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self {
            name: "fontgen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl GeneratorInfo {
    /// Creates generator info with the default banner.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }

    /// Replaces the license banner.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}

/// A batch of fonts to convert, loaded from a JSON job file.
///
/// ```json
/// {
///   "output_dir": "include/fonts",
///   "fonts": [
///     { "path": "fonts/Arial.ttf", "sizes": [12, 16] },
///     { "path": "fonts/mono.ttf", "sizes": [8], "name": "Mono" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontJob {
    /// Directory receiving the headers. Defaults to the job file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Fonts to convert.
    pub fonts: Vec<FontJobEntry>,
}

/// One font of a [`FontJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontJobEntry {
    /// Font source path.
    pub path: PathBuf,

    /// Pixel sizes to generate, in table order.
    pub sizes: Vec<u32>,

    /// Overrides the font's embedded name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FontJob {
    /// Parses a job from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FontError> {
        let job: FontJob = serde_json::from_str(json)
            .map_err(|e| FontError::Configuration(format!("invalid job file: {}", e)))?;
        job.validate()?;
        Ok(job)
    }

    /// Reads a job file and resolves its relative paths against the file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| FontError::io(path, e))?;
        let job = Self::from_json(&json)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(job.resolve_paths(base))
    }

    /// Makes every relative path absolute with respect to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.output_dir = Some(match self.output_dir.take() {
            Some(dir) if dir.is_relative() => base.join(dir),
            Some(dir) => dir,
            None => base.to_path_buf(),
        });
        for entry in &mut self.fonts {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
        self
    }

    /// Checks that the job names at least one font and every font at least
    /// one valid size.
    pub fn validate(&self) -> Result<(), FontError> {
        if self.fonts.is_empty() {
            return Err(FontError::Configuration(
                "job file lists no fonts".to_string(),
            ));
        }
        for (index, entry) in self.fonts.iter().enumerate() {
            validate_sizes(&entry.sizes).map_err(|e| match e {
                FontError::Configuration(msg) => {
                    FontError::Configuration(format!("fonts[{}]: {}", index, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Largest pixel size whose byte stride fits the 8-bit `stride` field of the
/// generated `Table`.
pub const MAX_PIXEL_SIZE: u32 = 8 * u8::MAX as u32;

/// Rejects empty size lists, zero or oversized sizes and duplicates.
pub fn validate_sizes(sizes: &[u32]) -> Result<(), FontError> {
    if sizes.is_empty() {
        return Err(FontError::Configuration(
            "at least one pixel size is required".to_string(),
        ));
    }
    for (i, &size) in sizes.iter().enumerate() {
        if size == 0 {
            return Err(FontError::Configuration(
                "pixel sizes must be greater than zero".to_string(),
            ));
        }
        if size > MAX_PIXEL_SIZE {
            return Err(FontError::Configuration(format!(
                "pixel size {} exceeds the maximum of {}",
                size, MAX_PIXEL_SIZE
            )));
        }
        if sizes[..i].contains(&size) {
            return Err(FontError::Configuration(format!(
                "pixel size {} is listed more than once",
                size
            )));
        }
    }
    Ok(())
}

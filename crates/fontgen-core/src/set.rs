//! A font converted at several sizes and exported as one header.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::{validate_sizes, GeneratorInfo};
use crate::converter::{FontdueConverter, GlyphConverter};
use crate::error::FontError;
use crate::header::{c_identifier, render_font_set};
use crate::record::FontRecord;

/// Result of writing a header to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Path of the written header.
    pub path: PathBuf,
    /// BLAKE3 hash of the header contents.
    pub hash: String,
    /// Size of the header in bytes.
    pub bytes: usize,
    /// `(width, height)` of every table, in header order.
    pub tables: Vec<(u32, u32)>,
}

/// One font source converted at an ordered list of pixel sizes.
#[derive(Debug)]
pub struct FontSet {
    records: Vec<FontRecord>,
}

impl FontSet {
    /// Opens `path` once per size with the `fontdue` rasterizer.
    pub fn open(path: impl AsRef<Path>, sizes: &[u32]) -> Result<Self, FontError> {
        Self::open_inner(path.as_ref(), sizes, None)
    }

    /// Like [`FontSet::open`], but names the font `name` instead of using the
    /// name embedded in the file.
    pub fn open_with_name(
        path: impl AsRef<Path>,
        sizes: &[u32],
        name: &str,
    ) -> Result<Self, FontError> {
        Self::open_inner(path.as_ref(), sizes, Some(name))
    }

    fn open_inner(path: &Path, sizes: &[u32], name: Option<&str>) -> Result<Self, FontError> {
        validate_sizes(sizes)?;
        let converters = sizes
            .iter()
            .map(|&size| {
                let converter = FontdueConverter::open(path, size)?;
                let converter = match name {
                    Some(name) => converter.with_name(name),
                    None => converter,
                };
                Ok(Box::new(converter) as Box<dyn GlyphConverter>)
            })
            .collect::<Result<Vec<_>, FontError>>()?;
        Self::from_converters(converters)
    }

    /// Builds a set from ready converters, one record per converter in order.
    pub fn from_converters(converters: Vec<Box<dyn GlyphConverter>>) -> Result<Self, FontError> {
        let sizes: Vec<u32> = converters.iter().map(|c| c.requested_size()).collect();
        validate_sizes(&sizes)?;
        Ok(Self {
            records: converters.into_iter().map(FontRecord::new).collect(),
        })
    }

    /// Converts every record, in order.
    pub fn convert(&mut self) -> Result<(), FontError> {
        for record in &mut self.records {
            record.convert()?;
        }
        Ok(())
    }

    /// Records in size order.
    pub fn records(&self) -> &[FontRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Font name, taken from the first record.
    pub fn name(&self) -> &str {
        self.records.first().map(FontRecord::name).unwrap_or_default()
    }

    /// File name of the generated header, e.g. `Arial.h`.
    pub fn header_file_name(&self) -> String {
        format!("{}.h", c_identifier(self.name()))
    }

    /// Checks that every record is converted, all share one name and no two
    /// tables have the same height.
    pub fn ensure_exportable(&self) -> Result<(), FontError> {
        let first = self.records.first().ok_or_else(|| {
            FontError::Configuration("font set has no sizes".to_string())
        })?;
        for (i, record) in self.records.iter().enumerate() {
            if !record.is_converted() {
                return Err(FontError::Configuration(format!(
                    "size {}px has not been converted",
                    record.requested_size()
                )));
            }
            if record.name() != first.name() {
                return Err(FontError::Configuration(format!(
                    "font set mixes font names '{}' and '{}'",
                    first.name(),
                    record.name()
                )));
            }
            // Tables are named after the cell height.
            if let Some(earlier) = self.records[..i]
                .iter()
                .find(|r| r.pixel_height() == record.pixel_height())
            {
                return Err(FontError::Configuration(format!(
                    "sizes {}px and {}px both produce {}px tall tables",
                    earlier.requested_size(),
                    record.requested_size(),
                    record.pixel_height()
                )));
            }
        }
        Ok(())
    }

    /// Renders the header text without touching the filesystem.
    pub fn render(&self, info: &GeneratorInfo) -> Result<String, FontError> {
        self.ensure_exportable()?;
        Ok(render_font_set(self, info))
    }

    /// Writes `<font name>.h` into `output_dir`.
    ///
    /// The header is rendered in memory and written to a temporary file in
    /// the same directory, which then replaces the target in one rename.
    pub fn export(
        &self,
        output_dir: impl AsRef<Path>,
        info: &GeneratorInfo,
    ) -> Result<ExportSummary, FontError> {
        let output_dir = output_dir.as_ref();
        let contents = self.render(info)?;

        if !output_dir.is_dir() {
            return Err(FontError::io(
                output_dir,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "output directory does not exist",
                ),
            ));
        }

        let path = output_dir.join(self.header_file_name());
        let mut file = tempfile::Builder::new()
            .prefix(".fontgen-")
            .suffix(".h.tmp")
            .tempfile_in(output_dir)
            .map_err(|e| FontError::io(output_dir, e))?;
        write_contents(&mut file, &contents).map_err(|e| FontError::io(file.path(), e))?;
        file.persist(&path)
            .map_err(|e| FontError::io(&path, e.error))?;

        Ok(ExportSummary {
            path,
            hash: blake3::hash(contents.as_bytes()).to_hex().to_string(),
            bytes: contents.len(),
            tables: self
                .records
                .iter()
                .map(|r| (r.pixel_width(), r.pixel_height()))
                .collect(),
        })
    }
}

fn write_contents(file: &mut NamedTempFile, contents: &str) -> std::io::Result<()> {
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    // Temp files are created owner-only; headers should be world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    Ok(())
}

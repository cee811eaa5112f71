//! Generate command implementation
//!
//! Converts one font file at the requested sizes and writes its header.

use anyhow::{Context, Result};
use colored::Colorize;
use fontgen_core::{FontSet, GeneratorInfo};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{GenerateOutput, GeneratedHeader, JsonError};

/// Run the generate command
///
/// # Arguments
/// * `font_path` - Path to the font file
/// * `sizes` - Pixel sizes, in table order
/// * `out_dir` - Output directory (default: current directory)
/// * `name` - Overrides the font's embedded name
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    font_path: &str,
    sizes: &[u32],
    out_dir: Option<&str>,
    name: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let out_dir = Path::new(out_dir.unwrap_or("."));
    let info = GeneratorInfo::default();

    if json_output {
        let output = match generate_header(Path::new(font_path), sizes, name, out_dir, &info) {
            Ok(header) => GenerateOutput::success(vec![header]),
            Err(e) => GenerateOutput::failure(
                vec![JsonError::from_anyhow(&e).with_file(font_path)],
                Vec::new(),
            ),
        };
        println!("{}", output.to_json());
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Converting:".cyan().bold(), font_path);
    let header = generate_header(Path::new(font_path), sizes, name, out_dir, &info)?;
    print_header(&header);
    println!("{} Header written", "SUCCESS".green().bold());

    Ok(ExitCode::SUCCESS)
}

/// Opens, converts and exports one font, attaching the font path to any error.
pub fn generate_header(
    font_path: &Path,
    sizes: &[u32],
    name: Option<&str>,
    out_dir: &Path,
    info: &GeneratorInfo,
) -> Result<GeneratedHeader> {
    let set = open_font(font_path, sizes, name)?;
    export_font(&set, font_path, out_dir, info)
}

/// Opens and converts one font.
pub fn open_font(font_path: &Path, sizes: &[u32], name: Option<&str>) -> Result<FontSet> {
    let mut set = match name {
        Some(name) => FontSet::open_with_name(font_path, sizes, name),
        None => FontSet::open(font_path, sizes),
    }
    .with_context(|| format!("Failed to open font: {}", font_path.display()))?;

    set.convert()
        .with_context(|| format!("Failed to convert font: {}", font_path.display()))?;
    Ok(set)
}

/// Writes the header of a converted font.
pub fn export_font(
    set: &FontSet,
    font_path: &Path,
    out_dir: &Path,
    info: &GeneratorInfo,
) -> Result<GeneratedHeader> {
    let summary = set
        .export(out_dir, info)
        .with_context(|| format!("Failed to export header for: {}", font_path.display()))?;

    Ok(GeneratedHeader::new(set.name(), &summary))
}

/// Prints the per-size lines and output path of one header.
pub(crate) fn print_header(header: &GeneratedHeader) {
    for table in &header.tables {
        println!(
            "  {} {} {}x{} px (stride {})",
            "✓".green(),
            header.font_name,
            table.width,
            table.height,
            table.height.div_ceil(8)
        );
    }
    println!(
        "  {} {} ({} bytes, blake3 {})",
        "->".dimmed(),
        header.path,
        header.bytes,
        &header.hash[..header.hash.len().min(16)]
    );
}

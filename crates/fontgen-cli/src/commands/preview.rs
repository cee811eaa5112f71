//! Preview command implementation
//!
//! Rasterizes a few characters at one size and prints them as block art.

use anyhow::{Context, Result};
use colored::Colorize;
use fontgen_core::{byte_stride, FontdueConverter, GlyphConverter};
use std::process::ExitCode;

/// Run the preview command
///
/// # Arguments
/// * `font_path` - Path to the font file
/// * `size` - Pixel size to rasterize at
/// * `chars` - Characters to show
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(font_path: &str, size: u32, chars: &str) -> Result<ExitCode> {
    let converter = FontdueConverter::open(font_path, size)
        .with_context(|| format!("Failed to open font: {}", font_path))?;

    println!(
        "{} {} {}x{} px, stride {}, baseline {}",
        "Font:".cyan().bold(),
        converter.font_name(),
        converter.pixel_width(),
        converter.pixel_height(),
        byte_stride(converter.pixel_height()),
        converter.baseline()
    );

    for c in chars.chars() {
        let Some(code) = latin1_code(c) else {
            println!(
                "{} '{}' is outside character codes 0-255, skipped",
                "WARNING".yellow().bold(),
                c
            );
            continue;
        };

        let glyph = converter
            .convert_character(code)
            .with_context(|| format!("Failed to rasterize '{}'", c))?;
        println!();
        println!("{}", format!("0x{:02X} '{}'", code, c).dimmed());
        print!("{}", glyph);
    }

    Ok(ExitCode::SUCCESS)
}

/// Character code of `c` in the 0-255 table, if it has one.
fn latin1_code(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

//! CLI argument definitions for the fontgen command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// fontgen - OTOS font lookup table generator
#[derive(Parser, Debug)]
#[command(name = "fontgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a lookup table header from a font file
    Generate {
        /// Path to the font file (TrueType or OpenType)
        #[arg(short, long)]
        font: String,

        /// Pixel sizes to generate, in table order (repeat or comma separate)
        #[arg(
            short,
            long = "size",
            required = true,
            value_delimiter = ',',
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        sizes: Vec<u32>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Override the font name used for the header and its namespace
        #[arg(short, long)]
        name: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate headers for every font listed in a JSON job file
    Batch {
        /// Path to the job file
        #[arg(short, long)]
        job: String,

        /// Output directory, overriding the job file's `output_dir`
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print rasterized glyphs of a font to the terminal
    Preview {
        /// Path to the font file (TrueType or OpenType)
        #[arg(short, long)]
        font: String,

        /// Pixel size to rasterize at
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,

        /// Characters to show
        #[arg(short, long, default_value = "fontgen")]
        chars: String,
    },
}

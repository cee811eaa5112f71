//! fontgen CLI - converts fonts into OTOS lookup table headers

use clap::Parser;
use std::process::ExitCode;

use fontgen_cli::cli_args::{Cli, Commands};
use fontgen_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            font,
            sizes,
            out_dir,
            name,
            json,
        } => commands::generate::run(&font, &sizes, out_dir.as_deref(), name.as_deref(), json),
        Commands::Batch { job, out_dir, json } => {
            commands::batch::run(&job, out_dir.as_deref(), json)
        }
        Commands::Preview { font, size, chars } => commands::preview::run(&font, size, &chars),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

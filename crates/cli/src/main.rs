//! `charforge`: inspect definitions and validate, export or compare builds.
//!
//! Run with: `charforge --data-dir data <command>`

mod commands;
mod context;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Compare, Export, Optimize, Suggest, Validate};

use crate::context::Context;

/// Character build tools
#[derive(Parser)]
#[command(name = "charforge")]
#[command(about = "Validate, resolve and export character builds", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding classes.ron, skills.ron and config.toml
    /// (defaults to CHARFORGE_DATA_DIR, then `data`)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load the definitions and report catalog structure
    Check(Check),

    /// Validate a build request and report budget usage
    Validate(Validate),

    /// Export a build request as engine JSON
    Export(Export),

    /// Compare the power level of two builds
    Compare(Compare),

    /// Suggest an attribute allocation for a class
    Suggest(Suggest),

    /// Nudge a build's attribute allocation toward its class suggestion
    Optimize(Optimize),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for CHARFORGE_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let context = Context::new(cli.data_dir);

    match cli.command {
        Command::Check(cmd) => cmd.execute(&context),
        Command::Validate(cmd) => cmd.execute(&context),
        Command::Export(cmd) => cmd.execute(&context),
        Command::Compare(cmd) => cmd.execute(&context),
        Command::Suggest(cmd) => cmd.execute(&context),
        Command::Optimize(cmd) => cmd.execute(&context),
    }
}

//! # tsguard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tsguard_cli::check::{run_check, CheckArgs};
use tsguard_cli::lint::{run_lint, LintArgs};
use tsguard_cli::{resolve_path, DEFAULT_DESCRIPTOR_DIR};

/// tsguard — runtime shape validation for JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "tsguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing descriptor documents.
    #[arg(long, global = true, default_value = DEFAULT_DESCRIPTOR_DIR)]
    descriptors: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against a named descriptor.
    Check(CheckArgs),

    /// Compile every descriptor and print it in type notation.
    Lint(LintArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let descriptor_dir = resolve_path(&cli.descriptors, &cwd);
    tracing::debug!(descriptor_dir = %descriptor_dir.display(), "resolved descriptor directory");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &descriptor_dir),
        Commands::Lint(args) => run_lint(&args, &descriptor_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

//! # Lint Subcommand
//!
//! Compiles every descriptor in the descriptor directory and prints each
//! one in type notation. Any descriptor that fails to load or compile
//! fails the whole command, naming the file and the problem.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use tsguard_check::DescriptorRegistry;

/// Arguments for the `tsguard lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Print only the summary line.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute the lint subcommand. Returns exit code 0 when every descriptor
/// compiles.
pub fn run_lint(args: &LintArgs, descriptor_dir: &Path) -> Result<u8> {
    let registry = DescriptorRegistry::new(descriptor_dir)
        .with_context(|| format!("failed to load descriptors from {}", descriptor_dir.display()))?;

    if !args.quiet {
        for name in registry.names() {
            if let Some(checker) = registry.get(name) {
                println!("  {name}: {checker}");
            }
        }
    }
    println!("Descriptors: {} loaded", registry.len());

    if registry.is_empty() {
        tracing::warn!(dir = %descriptor_dir.display(), "no descriptor documents found");
    }

    Ok(0)
}

//! # Check Subcommand
//!
//! Validates JSON/YAML documents against one named descriptor from the
//! descriptor directory and prints a PASS/FAIL line per document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tsguard_check::{DescriptorRegistry, RegistryError};

/// Arguments for the `tsguard check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Descriptor name (file stem inside the descriptor directory).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Documents to validate (.json, .yaml, or .yml).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when every document passes, 1 on any validation
/// failure. Operational failures (unreadable descriptor directory, unknown
/// descriptor name) are returned as errors.
pub fn run_check(args: &CheckArgs, descriptor_dir: &Path) -> Result<u8> {
    let registry = DescriptorRegistry::new(descriptor_dir)
        .with_context(|| format!("failed to load descriptors from {}", descriptor_dir.display()))?;

    tracing::info!(
        descriptor_count = registry.len(),
        "loaded descriptor registry"
    );

    let checker = registry.get(&args.name).with_context(|| {
        format!(
            "descriptor '{}' not found; available: {}",
            args.name,
            registry.names().join(", ")
        )
    })?;
    tracing::debug!(name = %args.name, checker = %checker, "resolved descriptor");

    let total = args.documents.len();
    let mut failed = 0usize;

    for document in &args.documents {
        match registry.validate_file(document, &args.name) {
            Ok(()) => println!("  PASS: {}", document.display()),
            Err(RegistryError::Validation { source, .. }) => {
                failed += 1;
                println!("  FAIL: {} — {}", document.display(), source);
            }
            Err(e @ RegistryError::DocumentLoad { .. }) => {
                failed += 1;
                println!("  FAIL: {} — {}", document.display(), e);
            }
            Err(e) => return Err(e).context("validation aborted"),
        }
    }

    println!("Documents: {}/{} passed", total - failed, total);

    Ok(if failed > 0 { 1 } else { 0 })
}

//! # tsguard-cli — Command-Line Interface
//!
//! Provides the `tsguard` binary for validating data files at a trust
//! boundary (CI checks, fixture audits, API response captures).
//!
//! ## Subcommands
//!
//! - `tsguard check NAME DOCUMENT...` — validate documents against the
//!   descriptor `NAME`.
//! - `tsguard lint` — compile and print every descriptor.
//!
//! ```bash
//! tsguard --descriptors schemas/ check user fixtures/user-*.json
//! tsguard -v lint
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `tsguard-check`; no validation logic here.

pub mod check;
pub mod lint;

use std::path::{Path, PathBuf};

/// Default descriptor directory, relative to the working directory.
pub const DEFAULT_DESCRIPTOR_DIR: &str = "descriptors";

/// Resolve the descriptor directory. Absolute paths are returned as-is;
/// relative paths are joined onto `cwd`.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

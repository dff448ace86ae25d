//! # tsguard-core — Foundational Types for tsguard
//!
//! The value model every checker validates against, the path used to
//! locate failures inside a value, and the error taxonomy. The checker
//! descriptors and the matcher engine live in `tsguard-check`.
//!
//! ## Key Design Principles
//!
//! 1. **One closed value type.** `Value` covers JSON plus `undefined` and
//!    functions. Every conversion (`serde_json`, typed `Serialize` data)
//!    lands in it, so the matcher has a single exhaustive `match`.
//!
//! 2. **Strict, deep equality.** `PartialEq for Value` never coerces
//!    between kinds and compares containers structurally.
//!
//! 3. **One error variant per failure class.** Callers match on
//!    `ValidationError` variants instead of parsing messages.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tsguard-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{DefinitionError, GuardError, ValidationError};
pub use path::{PathSegment, ValuePath};
pub use value::{Callable, Value};

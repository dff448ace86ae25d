//! # tsguard-check — Checker Descriptors & Matching Engine
//!
//! Builds checker trees and validates values against them. A checker is
//! declared once, typically at start-up, and reused for every value that
//! crosses the boundary it guards:
//!
//! ```
//! use tsguard_check::{param, Checker, Field, NUMBER, STRING};
//! use tsguard_core::Value;
//!
//! let user = Checker::interface([
//!     Field::required("id", NUMBER),
//!     Field::required("name", STRING),
//!     Field::optional("tags", Checker::array(STRING)),
//! ])
//! .unwrap();
//!
//! let value = Value::from(serde_json::json!({"id": 1, "name": "x"}));
//! assert!(param(&user, &value).is_ok());
//! ```
//!
//! ## Modules
//!
//! - [`checker`] — the `Checker` sum type and its validating constructors.
//! - `matcher` (private) — the recursive engine.
//! - [`params`] — `param` and the arity-aware `multi_params`.
//! - [`descriptor`] — compile JSON/YAML descriptor documents into checkers.
//! - [`registry`] — a directory of descriptor documents indexed by name.
//!
//! ## Crate Policy
//!
//! - Depends only on `tsguard-core` internally.
//! - Validation never mutates the value or the checker; the first
//!   mismatch is returned and nothing is accumulated.
//! - Construction errors surface from the constructors, never from
//!   validation.

pub mod checker;
pub mod descriptor;
mod matcher;
pub mod params;
pub mod registry;

pub use checker::{
    Alternative, Checker, CheckerKind, EnumOptions, Field, Interface, KeyOf, Literal, Primitive,
    Union, ANY, BOOLEAN, FUNCTION, NUMBER, OBJECT, STRING,
};
pub use params::{arity, multi_params, param};
pub use registry::{DescriptorRegistry, RegistryError};

//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout tsguard. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - `ValidationError` is returned when a value does not match a checker.
//!   One variant per failure class; the first failure aborts the whole
//!   validation call.
//! - `DefinitionError` is returned when a checker cannot be built. These
//!   surface at schema-definition time, before any data is validated.
//! - Offending values are carried pre-rendered as strings so errors stay
//!   `Send + Sync + Eq` regardless of what was validated.

use thiserror::Error;

use crate::path::ValuePath;

/// Top-level error type for tsguard.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A checker could not be constructed.
    #[error("definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// A value did not match its checker.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A value failed validation against a checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value's runtime kind differs from the primitive kind.
    #[error("not a valid {expected} type: '{found}'")]
    TypeMismatch {
        /// Expected primitive kind name.
        expected: &'static str,
        /// The offending value, plain-rendered.
        found: String,
    },

    /// A required interface field is not an own key of the value.
    #[error("missing required key: {key}")]
    MissingKey {
        /// Name of the missing field.
        key: String,
    },

    /// The value has a key the interface does not declare.
    #[error("unexpected key: {}", quote_key(.key))]
    UnexpectedKey {
        /// The undeclared key.
        key: String,
    },

    /// An object was required.
    #[error("not a valid object: {found}")]
    NotAnObject {
        /// The offending value, JSON-rendered.
        found: String,
    },

    /// An array was required.
    #[error("not a valid array type: {found}")]
    NotAnArray {
        /// The offending value, JSON-rendered.
        found: String,
    },

    /// The value is not one of the enum's options.
    #[error("not a valid option: '{found}', accepted options are: {options}")]
    EnumRejected {
        /// The offending value, plain-rendered.
        found: String,
        /// Accepted options in declaration order, joined with `" | "`.
        options: String,
    },

    /// No union alternative accepted the value.
    #[error("value {found} is not assignable to union")]
    UnionExhausted {
        /// The offending value, JSON-rendered.
        found: String,
    },

    /// The value differs from a literal's reference value.
    #[error("unexpected literal value: {found}, at {path}")]
    LiteralMismatch {
        /// The offending value at `path`, JSON-rendered.
        found: String,
        /// Location of the mismatch from the root.
        path: ValuePath,
    },

    /// The value is not an own key of the key-of reference object.
    #[error("key {key} is invalid")]
    KeyLookupFailed {
        /// The offending value, plain-rendered.
        key: String,
    },

    /// The argument count is outside the accepted range.
    #[error("expecting {min}-{max} arguments, received {received}")]
    ArityOutOfRange {
        /// Number of non-optional checkers.
        min: usize,
        /// Total number of checkers.
        max: usize,
        /// Number of arguments supplied.
        received: usize,
    },
}

/// A checker could not be constructed from its arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// A descriptor document does not describe a checker.
    #[error("not a valid type checker: {0}")]
    InvalidChecker(String),

    /// An interface must declare at least one field.
    #[error("interface must declare at least one field")]
    EmptyInterface,

    /// An interface declared the same field name twice.
    #[error("interface field declared more than once: {0}")]
    DuplicateField(String),

    /// An enum must offer at least one option.
    #[error("enum must offer at least one option")]
    EmptyEnum,

    /// Enum options must be null, booleans, numbers, or strings.
    #[error("enum options must be primitive values, got: {0}")]
    NonPrimitiveOption(String),

    /// A union must have at least one alternative.
    #[error("union must have at least one alternative")]
    EmptyUnion,

    /// A literal's reference value must be pure data.
    #[error("missing literal value to use: {0}")]
    UndefinedLiteral(String),

    /// Optional keys were given for a literal whose reference is not an
    /// object.
    #[error("optional keys need an object literal, got: {0}")]
    OptionalKeysOnNonObject(String),

    /// An optional key names no member of the literal's reference object.
    #[error("optional key is not part of the literal: {0}")]
    UndeclaredOptionalKey(String),

    /// A key-of reference must be a plain object.
    #[error("key-of reference must be an object, got: {0}")]
    KeyOfNotObject(String),

    /// The primitive kind name is not recognised.
    #[error("unknown primitive type: {0}")]
    UnknownPrimitive(String),
}

/// JSON string quoting, matching how keys appear in a [`ValuePath`].
fn quote_key(key: &str) -> String {
    serde_json::Value::String(key.to_string()).to_string()
}

//! # Descriptor Registry
//!
//! Loads every descriptor document in a directory, compiles it, and
//! indexes the resulting checker by file stem (`user.yaml` → `user`).
//! Documents are then validated against a named checker.
//!
//! ## Formats
//!
//! `.json` files are parsed as JSON; `.yaml` and `.yml` files are parsed
//! as YAML and converted to the equivalent JSON tree before compilation or
//! validation. Other files in the directory are ignored.
//!
//! ## Thread Safety
//!
//! `DescriptorRegistry` is `Send + Sync`. Loading happens once at
//! construction; validation only reads the compiled checkers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value as Json;
use thiserror::Error;
use tsguard_core::{DefinitionError, ValidationError, Value};

use crate::checker::Checker;
use crate::descriptor;
use crate::params::param;

/// Error while loading descriptors or validating documents.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The descriptor file could not be read or parsed.
    #[error("descriptor load error for '{name}': {reason}")]
    DescriptorLoad {
        /// Descriptor filename or directory.
        name: String,
        /// Reason the descriptor could not be loaded.
        reason: String,
    },

    /// The descriptor parsed but does not describe a valid checker.
    #[error("descriptor '{name}' is not a valid checker: {source}")]
    Definition {
        /// Descriptor name.
        name: String,
        /// The construction failure.
        #[source]
        source: DefinitionError,
    },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// No descriptor is registered under the requested name.
    #[error("descriptor '{name}' not found in {dir}")]
    NotFound {
        /// Requested descriptor name.
        name: String,
        /// Registry directory.
        dir: String,
    },

    /// The document does not match the descriptor.
    #[error("validation failed against descriptor '{name}': {source}")]
    Validation {
        /// Descriptor name.
        name: String,
        /// The first mismatch found.
        #[source]
        source: ValidationError,
    },

    /// IO error reading the descriptor directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compiled descriptors loaded from one directory.
#[derive(Debug)]
pub struct DescriptorRegistry {
    dir: PathBuf,
    checkers: BTreeMap<String, Checker>,
}

impl DescriptorRegistry {
    /// Load and compile every descriptor document in `dir`.
    ///
    /// # Errors
    ///
    /// `DescriptorLoad` if the directory or a file cannot be read or
    /// parsed, or if two files share a stem; `Definition` if a document
    /// does not compile.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&dir).map_err(|e| RegistryError::DescriptorLoad {
            name: dir.display().to_string(),
            reason: format!("cannot read descriptor directory: {e}"),
        })?;

        let mut checkers = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || DocumentFormat::of(&path).is_none() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let doc = read_document(&path).map_err(|reason| RegistryError::DescriptorLoad {
                name: file_name.clone(),
                reason,
            })?;
            let checker = descriptor::compile(&doc).map_err(|source| RegistryError::Definition {
                name: name.to_string(),
                source,
            })?;
            tracing::debug!(name, kind = %checker.kind(), "compiled descriptor");

            if checkers.insert(name.to_string(), checker).is_some() {
                return Err(RegistryError::DescriptorLoad {
                    name: file_name,
                    reason: format!("descriptor '{name}' is defined by more than one file"),
                });
            }
        }

        Ok(Self { dir, checkers })
    }

    /// Returns the descriptor directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the number of loaded descriptors.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Returns true if no descriptors were loaded.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Returns the names of all loaded descriptors, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        self.checkers.keys().map(String::as_str).collect()
    }

    /// Look up a compiled checker by name.
    pub fn get(&self, name: &str) -> Option<&Checker> {
        self.checkers.get(name)
    }

    fn checker(&self, name: &str) -> Result<&Checker, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
            dir: self.dir.display().to_string(),
        })
    }

    /// Validate a value against a named descriptor.
    ///
    /// # Errors
    ///
    /// `NotFound` if no descriptor has that name; `Validation` with the
    /// first mismatch if the value does not match.
    pub fn validate_document(&self, instance: &Value, name: &str) -> Result<(), RegistryError> {
        let checker = self.checker(name)?;
        param(checker, instance).map_err(|source| RegistryError::Validation {
            name: name.to_string(),
            source,
        })
    }

    /// Validate a JSON or YAML file against a named descriptor. The format
    /// is chosen by extension; anything other than `.yaml`/`.yml` is read
    /// as JSON.
    ///
    /// # Errors
    ///
    /// `DocumentLoad` if the file cannot be read or parsed, otherwise as
    /// [`validate_document`](Self::validate_document).
    pub fn validate_file(&self, document_path: &Path, name: &str) -> Result<(), RegistryError> {
        let checker = self.checker(name)?;
        let doc = read_document(document_path).map_err(|reason| RegistryError::DocumentLoad {
            path: document_path.display().to_string(),
            reason,
        })?;
        param(checker, &Value::from(doc)).map_err(|source| RegistryError::Validation {
            name: name.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(DocumentFormat::Json),
            Some("yaml" | "yml") => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Read a JSON or YAML file into a JSON tree.
fn read_document(path: &Path) -> Result<Json, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read file: {e}"))?;
    match DocumentFormat::of(path).unwrap_or(DocumentFormat::Json) {
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| format!("invalid YAML: {e}"))?;
            yaml_to_json(&yaml).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
        }
        DocumentFormat::Json => {
            serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {e}"))
        }
    }
}

/// Convert a parsed YAML document into JSON.
///
/// Only the JSON-compatible subset is accepted: mapping keys must be
/// strings (a YAML `1:` key is rejected rather than renamed to `"1"`), and
/// numbers must be finite. Tags are ignored.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Json, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(*b),
        Yaml::Number(n) => yaml_number(n)?,
        Yaml::String(s) => Json::String(s.clone()),
        Yaml::Sequence(items) => {
            Json::Array(items.iter().map(yaml_to_json).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(entries) => Json::Object(
            entries
                .iter()
                .map(|(key, value)| match key {
                    Yaml::String(key) => Ok((key.clone(), yaml_to_json(value)?)),
                    other => Err(format!("mapping key is not a string: {other:?}")),
                })
                .collect::<Result<_, String>>()?,
        ),
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Json, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Json::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Json::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Json::Number)
        .ok_or_else(|| format!("number {n} has no JSON representation"))
}

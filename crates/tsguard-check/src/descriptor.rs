//! # Descriptor Documents
//!
//! Compiles declarative JSON (or YAML, converted to JSON) documents into
//! [`Checker`] trees, so checkers can live in files next to the data they
//! guard.
//!
//! ## Format
//!
//! ```yaml
//! kind: interface
//! fields:
//!   host: string
//!   port: number
//!   ssl: boolean
//!   mode:
//!     kind: union
//!     of: [number]
//!     literals: [auto]
//! optional: [ssl]
//! ```
//!
//! - A bare string names a primitive (`string`, `number`, `boolean`,
//!   `function`, `object`, `any`).
//! - An object selects its variant with `kind`: `interface`, `enum`,
//!   `array`, `optional`, `map` (alias `record`), `literal`, `union`,
//!   `keyof`, or a primitive name.
//! - `interface` and object `literal` documents may list `optional` keys.
//!
//! Structural problems in a document are reported as
//! [`DefinitionError::InvalidChecker`] with the location inside the
//! document; argument problems (empty enum, empty union, …) keep the
//! constructor's own error variant.

use serde_json::{Map, Value as Json};
use tsguard_core::{DefinitionError, Value};

use crate::checker::{Checker, Field, Primitive};

/// Compile a descriptor document into a checker.
///
/// # Errors
///
/// Returns `InvalidChecker` if the document does not describe a checker,
/// or the constructor's error if a checker's arguments are invalid.
pub fn compile(doc: &Json) -> Result<Checker, DefinitionError> {
    compile_at(doc, "")
}

fn invalid(at: &str, reason: impl std::fmt::Display) -> DefinitionError {
    let location = if at.is_empty() { "(root)" } else { at };
    DefinitionError::InvalidChecker(format!("{location}: {reason}"))
}

fn child(at: &str, segment: &str) -> String {
    format!("{at}/{segment}")
}

fn member<'a>(map: &'a Map<String, Json>, key: &str, at: &str) -> Result<&'a Json, DefinitionError> {
    map.get(key)
        .ok_or_else(|| invalid(at, format!("missing required member \"{key}\"")))
}

fn array_member<'a>(
    map: &'a Map<String, Json>,
    key: &str,
    at: &str,
) -> Result<&'a [Json], DefinitionError> {
    match map.get(key) {
        None => Ok(&[]),
        Some(Json::Array(items)) => Ok(items),
        Some(other) => Err(invalid(
            &child(at, key),
            format!("expected an array, got {other}"),
        )),
    }
}

fn compile_at(doc: &Json, at: &str) -> Result<Checker, DefinitionError> {
    match doc {
        Json::String(name) => Primitive::from_name(name)
            .map(Checker::Primitive)
            .map_err(|_| invalid(at, format!("unknown type name {doc}"))),
        Json::Object(map) => {
            let kind = match map.get("kind") {
                Some(Json::String(kind)) => kind.as_str(),
                Some(other) => return Err(invalid(at, format!("\"kind\" must be a string, got {other}"))),
                None => return Err(invalid(at, "missing required member \"kind\"")),
            };
            compile_kind(kind, map, at)
        }
        other => Err(invalid(
            at,
            format!("expected a type name or descriptor object, got {other}"),
        )),
    }
}

fn compile_kind(kind: &str, map: &Map<String, Json>, at: &str) -> Result<Checker, DefinitionError> {
    match kind {
        "interface" => compile_interface(map, at),
        "enum" => {
            let values = member(map, "values", at)?;
            let Json::Array(values) = values else {
                return Err(invalid(&child(at, "values"), format!("expected an array, got {values}")));
            };
            Checker::enumeration(values.iter().map(Value::from))
        }
        "array" => {
            let items = member(map, "items", at)?;
            Ok(Checker::array(compile_at(items, &child(at, "items"))?))
        }
        "optional" => {
            let inner = member(map, "inner", at)?;
            Ok(Checker::optional(compile_at(inner, &child(at, "inner"))?))
        }
        "map" | "record" => {
            let values = member(map, "values", at)?;
            Ok(Checker::map(compile_at(values, &child(at, "values"))?))
        }
        "literal" => {
            let reference = Value::from(member(map, "value", at)?);
            Checker::literal_with_optional(reference, optional_names(map, at)?)
        }
        "union" => compile_union(map, at),
        "keyof" => Checker::key_of(Value::from(member(map, "object", at)?)),
        other => Primitive::from_name(other)
            .map(Checker::Primitive)
            .map_err(|_| invalid(at, format!("unknown kind \"{other}\""))),
    }
}

fn compile_interface(map: &Map<String, Json>, at: &str) -> Result<Checker, DefinitionError> {
    let fields_at = child(at, "fields");
    let fields = match member(map, "fields", at)? {
        Json::Object(fields) => fields,
        other => return Err(invalid(&fields_at, format!("expected an object, got {other}"))),
    };

    let optional = optional_names(map, at)?;
    if let Some(name) = optional.iter().find(|name| !fields.contains_key(**name)) {
        return Err(invalid(
            &child(at, "optional"),
            format!("optional field \"{name}\" is not declared in fields"),
        ));
    }

    let declared = fields
        .iter()
        .map(|(name, field_doc)| {
            let checker = compile_at(field_doc, &child(&fields_at, name))?;
            Ok(if optional.contains(&name.as_str()) {
                Field::optional(name.clone(), checker)
            } else {
                Field::required(name.clone(), checker)
            })
        })
        .collect::<Result<Vec<_>, DefinitionError>>()?;
    Checker::interface(declared)
}

/// Names listed under `optional`, in document order.
fn optional_names<'a>(map: &'a Map<String, Json>, at: &str) -> Result<Vec<&'a str>, DefinitionError> {
    let optional_at = child(at, "optional");
    array_member(map, "optional", at)?
        .iter()
        .enumerate()
        .map(|(i, name)| match name {
            Json::String(name) => Ok(name.as_str()),
            _ => Err(invalid(&child(&optional_at, &i.to_string()), "expected a key name")),
        })
        .collect()
}

fn compile_union(map: &Map<String, Json>, at: &str) -> Result<Checker, DefinitionError> {
    let of_at = child(at, "of");
    let mut alternatives = Vec::new();
    for (i, alternative) in array_member(map, "of", at)?.iter().enumerate() {
        alternatives.push(compile_at(alternative, &child(&of_at, &i.to_string()))?);
    }
    for literal in array_member(map, "literals", at)? {
        alternatives.push(Checker::literal(Value::from(literal))?);
    }
    Checker::union(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Alternative, NUMBER, STRING};
    use serde_json::json;

    #[test]
    fn bare_string_is_primitive() {
        assert_eq!(compile(&json!("string")).unwrap(), STRING);
        assert_eq!(compile(&json!({"kind": "number"})).unwrap(), NUMBER);
    }

    #[test]
    fn interface_with_optional_fields() {
        let checker = compile(&json!({
            "kind": "interface",
            "fields": {"host": "string", "port": "number", "ssl": "boolean"},
            "optional": ["ssl"]
        }))
        .unwrap();
        let expected = Checker::interface([
            Field::required("host", STRING),
            Field::required("port", NUMBER),
            Field::optional("ssl", crate::checker::BOOLEAN),
        ])
        .unwrap();
        assert_eq!(checker, expected);
    }

    #[test]
    fn optional_name_must_be_declared() {
        let err = compile(&json!({
            "kind": "interface",
            "fields": {"host": "string"},
            "optional": ["ssl"]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::InvalidChecker(
                "/optional: optional field \"ssl\" is not declared in fields".to_string()
            )
        );
    }

    #[test]
    fn literal_with_optional_keys() {
        let checker = compile(&json!({
            "kind": "literal",
            "value": {"status": "ok", "trace": "x"},
            "optional": ["trace"]
        }))
        .unwrap();
        assert_eq!(
            checker,
            Checker::literal_with_optional(json!({"status": "ok", "trace": "x"}), ["trace"])
                .unwrap()
        );
        assert_eq!(
            compile(&json!({"kind": "literal", "value": {"status": "ok"}, "optional": ["trace"]})),
            Err(DefinitionError::UndeclaredOptionalKey("trace".to_string()))
        );
    }

    #[test]
    fn nested_errors_carry_location() {
        let err = compile(&json!({
            "kind": "interface",
            "fields": {"tags": {"kind": "array", "items": "strng"}}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::InvalidChecker(
                "/fields/tags/items: unknown type name \"strng\"".to_string()
            )
        );
    }

    #[test]
    fn unknown_kind_is_invalid() {
        let err = compile(&json!({"kind": "tuple"})).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::InvalidChecker("(root): unknown kind \"tuple\"".to_string())
        );
        assert!(matches!(
            compile(&json!(42)),
            Err(DefinitionError::InvalidChecker(_))
        ));
        assert!(matches!(
            compile(&json!({"items": "string"})),
            Err(DefinitionError::InvalidChecker(_))
        ));
    }

    #[test]
    fn union_mixes_checkers_and_literals() {
        let checker = compile(&json!({
            "kind": "union",
            "of": ["number"],
            "literals": ["auto"]
        }))
        .unwrap();
        let expected =
            Checker::union([Alternative::from(NUMBER), Alternative::from("auto")]).unwrap();
        assert_eq!(checker, expected);
    }

    #[test]
    fn empty_union_keeps_constructor_error() {
        assert_eq!(
            compile(&json!({"kind": "union"})),
            Err(DefinitionError::EmptyUnion)
        );
    }

    #[test]
    fn remaining_kinds_compile() {
        assert!(compile(&json!({"kind": "enum", "values": ["a", "b"]})).is_ok());
        assert!(compile(&json!({"kind": "optional", "inner": "string"})).is_ok());
        assert!(compile(&json!({"kind": "record", "values": "number"})).is_ok());
        assert!(compile(&json!({"kind": "literal", "value": {"status": "ok"}})).is_ok());
        assert!(compile(&json!({"kind": "keyof", "object": {"light": 1}})).is_ok());
        assert!(matches!(
            compile(&json!({"kind": "keyof", "object": []})),
            Err(DefinitionError::KeyOfNotObject(_))
        ));
        assert!(matches!(
            compile(&json!({"kind": "enum", "values": "a"})),
            Err(DefinitionError::InvalidChecker(_))
        ));
    }
}

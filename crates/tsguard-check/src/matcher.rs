//! # Matcher Engine
//!
//! Walks a value and a checker tree in lockstep. Dispatch is a single
//! exhaustive `match` over [`Checker`]; composite checkers recurse with the
//! validation path extended by the field name or element index.
//!
//! ## Ordering
//!
//! For interfaces and object literals the key set is settled before any
//! field is visited: missing required keys are reported first, then
//! undeclared keys, then the first failing field. The first failure aborts
//! the walk.

use std::collections::{BTreeMap, BTreeSet};

use tsguard_core::{PathSegment, ValidationError, Value, ValuePath};

use crate::checker::{Checker, EnumOptions, Interface, KeyOf, Literal, Primitive, Union};

/// Stand-in for absent array elements and arguments.
pub(crate) static UNDEFINED: Value = Value::Undefined;

/// Validate `value` against `checker`, starting at `path`.
pub(crate) fn check(
    checker: &Checker,
    value: &Value,
    path: &mut ValuePath,
) -> Result<(), ValidationError> {
    match checker {
        Checker::Primitive(primitive) => check_primitive(*primitive, value),
        Checker::Interface(interface) => check_interface(interface, value, path),
        Checker::Enum(options) => check_enum(options, value),
        Checker::Array(element) => check_array(element, value, path),
        Checker::Optional(_) if value.is_nullish() => Ok(()),
        Checker::Optional(inner) => check(inner, value, path),
        Checker::Map(values) => check_map(values, value, path),
        Checker::Literal(literal) => check_literal(literal, value, path),
        Checker::Union(union) => check_union(union, value, path),
        Checker::KeyOf(key_of) => check_key_of(key_of, value),
    }
}

/// Run `f` with `segment` pushed onto `path`. The segment is popped again
/// whether or not `f` succeeds.
fn within<F>(path: &mut ValuePath, segment: PathSegment, f: F) -> Result<(), ValidationError>
where
    F: FnOnce(&mut ValuePath) -> Result<(), ValidationError>,
{
    path.push(segment);
    let result = f(path);
    path.pop();
    result
}

fn check_primitive(primitive: Primitive, value: &Value) -> Result<(), ValidationError> {
    if primitive.admits(value) {
        Ok(())
    } else {
        Err(ValidationError::TypeMismatch {
            expected: primitive.name(),
            found: value.to_string(),
        })
    }
}

fn expect_object(value: &Value) -> Result<&BTreeMap<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| ValidationError::NotAnObject {
        found: value.to_json_string(),
    })
}

/// Settle the key set of `actual`: every required key present, every
/// present key declared.
fn check_key_set<'a>(
    required: impl IntoIterator<Item = &'a str>,
    declares: impl Fn(&str) -> bool,
    actual: &BTreeMap<String, Value>,
) -> Result<(), ValidationError> {
    if let Some(missing) = required.into_iter().find(|key| !actual.contains_key(*key)) {
        return Err(ValidationError::MissingKey {
            key: missing.to_string(),
        });
    }
    if let Some(unexpected) = actual.keys().find(|key| !declares(key)) {
        return Err(ValidationError::UnexpectedKey {
            key: unexpected.clone(),
        });
    }
    Ok(())
}

fn check_interface(
    interface: &Interface,
    value: &Value,
    path: &mut ValuePath,
) -> Result<(), ValidationError> {
    let actual = expect_object(value)?;
    check_key_set(interface.required_names(), |key| interface.declares(key), actual)?;

    for field in interface.fields() {
        let Some(field_value) = actual.get(field.name()) else {
            continue;
        };
        // An optional field explicitly set to undefined counts as absent.
        if field.is_optional() && field_value.is_undefined() {
            continue;
        }
        within(path, PathSegment::Key(field.name().to_string()), |path| {
            check(field.checker(), field_value, path)
        })?;
    }
    Ok(())
}

fn check_enum(options: &EnumOptions, value: &Value) -> Result<(), ValidationError> {
    if options.contains(value) {
        return Ok(());
    }
    let accepted: Vec<String> = options.options().iter().map(Value::to_string).collect();
    Err(ValidationError::EnumRejected {
        found: value.to_string(),
        options: accepted.join(" | "),
    })
}

fn check_array(
    element: &Checker,
    value: &Value,
    path: &mut ValuePath,
) -> Result<(), ValidationError> {
    let items = value.as_array().ok_or_else(|| ValidationError::NotAnArray {
        found: value.to_json_string(),
    })?;
    for (i, item) in items.iter().enumerate() {
        within(path, PathSegment::Index(i), |path| check(element, item, path))?;
    }
    Ok(())
}

fn check_map(
    values: &Checker,
    value: &Value,
    path: &mut ValuePath,
) -> Result<(), ValidationError> {
    let actual = expect_object(value)?;
    for (key, entry) in actual {
        within(path, PathSegment::Key(key.clone()), |path| {
            check(values, entry, path)
        })?;
    }
    Ok(())
}

fn literal_mismatch(value: &Value, path: &ValuePath) -> ValidationError {
    ValidationError::LiteralMismatch {
        found: value.to_json_string(),
        path: path.clone(),
    }
}

fn check_literal(literal: &Literal, value: &Value, path: &mut ValuePath) -> Result<(), ValidationError> {
    check_literal_value(literal.reference(), Some(literal.optional_keys()), value, path)
}

/// Compare `value` against a literal `reference`. `optional` applies to
/// the keys of this level only; nested objects have every key required.
fn check_literal_value(
    reference: &Value,
    optional: Option<&BTreeSet<String>>,
    value: &Value,
    path: &mut ValuePath,
) -> Result<(), ValidationError> {
    match reference {
        Value::Object(expected) => {
            let Value::Object(actual) = value else {
                return Err(literal_mismatch(value, path));
            };
            let is_optional = |key: &str| optional.is_some_and(|keys| keys.contains(key));
            check_key_set(
                expected
                    .keys()
                    .map(String::as_str)
                    .filter(|key| !is_optional(*key)),
                |key| expected.contains_key(key),
                actual,
            )?;
            for (key, expected_field) in expected {
                let actual_field = actual.get(key);
                // An absent optional key, or one set to undefined, is skipped.
                if is_optional(key.as_str()) && actual_field.map_or(true, Value::is_undefined) {
                    continue;
                }
                let actual_field = actual_field.unwrap_or(&UNDEFINED);
                within(path, PathSegment::Key(key.clone()), |path| {
                    check_literal_value(expected_field, None, actual_field, path)
                })?;
            }
            Ok(())
        }
        Value::Array(expected) => {
            let Value::Array(actual) = value else {
                return Err(literal_mismatch(value, path));
            };
            // Walk the longer of the two so a length difference is reported
            // at the first index that exists on only one side.
            for i in 0..expected.len().max(actual.len()) {
                let expected_item = expected.get(i).unwrap_or(&UNDEFINED);
                let actual_item = actual.get(i).unwrap_or(&UNDEFINED);
                within(path, PathSegment::Index(i), |path| {
                    check_literal_value(expected_item, None, actual_item, path)
                })?;
            }
            Ok(())
        }
        primitive if primitive == value => Ok(()),
        _ => Err(literal_mismatch(value, path)),
    }
}

fn check_union(union: &Union, value: &Value, path: &mut ValuePath) -> Result<(), ValidationError> {
    if union
        .alternatives()
        .iter()
        .any(|alternative| check(alternative, value, path).is_ok())
    {
        return Ok(());
    }
    Err(ValidationError::UnionExhausted {
        found: value.to_json_string(),
    })
}

fn check_key_of(key_of: &KeyOf, value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(key) if key_of.contains(key) => Ok(()),
        _ => Err(ValidationError::KeyLookupFailed {
            key: value.to_string(),
        }),
    }
}

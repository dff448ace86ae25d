//! Property tests for the matcher engine.
//!
//! Generates JSON-like values and checks the algebraic guarantees of each
//! checker kind: primitives never coerce, arrays hold element-wise,
//! optional accepts nullish values, literals accept themselves and reject
//! any single-point mutation at the mutated location, unions are
//! order-independent for success, and optional keys of interfaces and
//! object literals may be dropped.

use proptest::prelude::*;
use tsguard_check::{param, Checker, Field, ANY, BOOLEAN, NUMBER, OBJECT, STRING};
use tsguard_core::{PathSegment, ValidationError, Value, ValuePath};

fn json_like_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-10_000i64..10_000).prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..5).prop_map(Value::Object),
        ]
    })
}

/// Every location in `value` paired with the path that reaches it.
fn locations(value: &Value, path: &ValuePath, out: &mut Vec<ValuePath>) {
    out.push(path.clone());
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                locations(item, &path.join(PathSegment::Index(i)), out);
            }
        }
        Value::Object(map) => {
            for (key, field) in map {
                locations(field, &path.join(PathSegment::Key(key.clone())), out);
            }
        }
        _ => {}
    }
}

/// Replace the node at `path` with a value that can never equal it.
fn mutate_at(value: &mut Value, segments: &[PathSegment]) {
    match segments.split_first() {
        None => *value = Value::String("\u{0}mutated".to_string()),
        Some((PathSegment::Index(i), rest)) => {
            if let Value::Array(items) = value {
                mutate_at(&mut items[*i], rest);
            }
        }
        Some((PathSegment::Key(key), rest)) => {
            if let Value::Object(map) = value {
                if let Some(field) = map.get_mut(key) {
                    mutate_at(field, rest);
                }
            }
        }
    }
}

fn primitive_checkers() -> Vec<(Checker, &'static str)> {
    vec![
        (STRING, "string"),
        (NUMBER, "number"),
        (BOOLEAN, "boolean"),
        (OBJECT, "object"),
    ]
}

proptest! {
    /// A primitive accepts a value iff the value's kind is exactly that
    /// primitive's kind.
    #[test]
    fn primitives_match_kind_exactly(value in json_like_value()) {
        for (checker, kind) in primitive_checkers() {
            prop_assert_eq!(param(&checker, &value).is_ok(), value.type_name() == kind);
        }
        prop_assert!(param(&ANY, &value).is_ok());
    }

    /// Array(T) holds iff every element satisfies T, including empty arrays.
    #[test]
    fn array_is_elementwise(items in prop::collection::vec(json_like_value(), 0..8)) {
        let checker = Checker::array(NUMBER);
        let all_numbers = items.iter().all(|item| matches!(item, Value::Number(_)));
        prop_assert_eq!(param(&checker, &Value::Array(items)).is_ok(), all_numbers);
    }

    /// Optional(T) accepts null and undefined for any T, and otherwise
    /// agrees with T.
    #[test]
    fn optional_delegates(value in json_like_value()) {
        let checker = Checker::optional(STRING);
        prop_assert!(param(&checker, &Value::Null).is_ok());
        prop_assert!(param(&checker, &Value::Undefined).is_ok());
        if !value.is_nullish() {
            prop_assert_eq!(param(&checker, &value).is_ok(), param(&STRING, &value).is_ok());
        }
    }

    /// A literal accepts its own reference value.
    #[test]
    fn literal_accepts_itself(value in json_like_value()) {
        let checker = Checker::literal(value.clone()).unwrap();
        prop_assert!(param(&checker, &value).is_ok());
    }

    /// Mutating one node of a copy is reported at exactly that node.
    #[test]
    fn literal_mutation_reports_location(value in json_like_value(), pick in any::<prop::sample::Index>()) {
        let mut paths = Vec::new();
        locations(&value, &ValuePath::root(), &mut paths);
        let target = pick.get(&paths).clone();

        let mut mutated = value.clone();
        mutate_at(&mut mutated, target.segments());

        let checker = Checker::literal(value).unwrap();
        match param(&checker, &mutated) {
            Err(ValidationError::LiteralMismatch { path, .. }) => prop_assert_eq!(path, target),
            other => prop_assert!(false, "expected LiteralMismatch at {}, got {:?}", target, other),
        }
    }

    /// Union success does not depend on the order of its alternatives.
    #[test]
    fn union_order_independent(value in json_like_value()) {
        let forward = Checker::union([NUMBER, Checker::array(ANY)]).unwrap();
        let backward = Checker::union([Checker::array(ANY), NUMBER]).unwrap();
        let either = param(&NUMBER, &value).is_ok() || param(&Checker::array(ANY), &value).is_ok();
        prop_assert_eq!(param(&forward, &value).is_ok(), either);
        prop_assert_eq!(param(&backward, &value).is_ok(), either);
    }

    /// Removing an optional field still passes; adding an undeclared field
    /// always fails.
    #[test]
    fn interface_optional_and_extra_keys(extra in "[a-z]{1,6}", include_note in any::<bool>()) {
        prop_assume!(extra != "id" && extra != "note");
        let checker = Checker::interface([
            Field::required("id", NUMBER),
            Field::optional("note", STRING),
        ])
        .unwrap();

        let mut fields = vec![("id", Value::from(1))];
        if include_note {
            fields.push(("note", Value::from("n")));
        }
        let base = Value::object(fields.clone());
        prop_assert!(param(&checker, &base).is_ok());

        let mut with_extra: Vec<(String, Value)> =
            fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        with_extra.push((extra.clone(), Value::Null));
        let err = param(&checker, &Value::object(with_extra)).unwrap_err();
        prop_assert_eq!(err, ValidationError::UnexpectedKey { key: extra });
    }

    /// Dropping any subset of a literal's optional keys still passes; an
    /// undeclared key always fails.
    #[test]
    fn literal_optional_keys_may_be_dropped(
        members in prop::collection::btree_map("[a-z]{1,6}", json_like_value(), 1..6),
        optional_mask in prop::collection::vec(any::<bool>(), 6),
        drop_mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let optional: Vec<String> = members
            .keys()
            .zip(&optional_mask)
            .filter(|(_, optional)| **optional)
            .map(|(key, _)| key.clone())
            .collect();
        let reference = Value::Object(members.clone());
        let checker = Checker::literal_with_optional(reference.clone(), optional.clone()).unwrap();
        prop_assert!(param(&checker, &reference).is_ok());

        let mut reduced = members.clone();
        for (key, drop) in optional.iter().zip(&drop_mask) {
            if *drop {
                reduced.remove(key);
            }
        }
        prop_assert!(param(&checker, &Value::Object(reduced.clone())).is_ok());

        reduced.insert("UNDECLARED".to_string(), Value::Null);
        prop_assert_eq!(
            param(&checker, &Value::Object(reduced)).unwrap_err(),
            ValidationError::UnexpectedKey { key: "UNDECLARED".to_string() }
        );
    }
}

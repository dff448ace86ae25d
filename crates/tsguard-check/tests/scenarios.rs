//! Integration test: end-to-end validation scenarios.
//!
//! Each test builds a checker through the public constructors and
//! validates values through `param` / `multi_params`, asserting on the
//! exact error variant and message a caller would see.

use serde_json::json;
use tsguard_check::{
    multi_params, one_of, param, Checker, Field, BOOLEAN, FUNCTION, NUMBER, OBJECT, STRING,
};
use tsguard_core::{Callable, ValidationError, Value, ValuePath};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn user() -> Checker {
    Checker::interface([
        Field::required("id", NUMBER),
        Field::required("name", STRING),
    ])
    .unwrap()
}

#[test]
fn interface_exact_shape() {
    let checker = user();
    param(&checker, &v(json!({"id": 1, "name": "x"}))).unwrap();

    let err = param(&checker, &v(json!({"id": 1}))).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingKey {
            key: "name".to_string()
        }
    );
    assert_eq!(err.to_string(), "missing required key: name");

    let err = param(&checker, &v(json!({"id": 1, "name": "x", "extra": 1}))).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnexpectedKey {
            key: "extra".to_string()
        }
    );
}

#[test]
fn enum_membership() {
    let checker = Checker::enumeration(["a", "b"]).unwrap();
    param(&checker, &v(json!("a"))).unwrap();

    let err = param(&checker, &v(json!("c"))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "not a valid option: 'c', accepted options are: a | b"
    );
    assert!(matches!(err, ValidationError::EnumRejected { .. }));
}

#[test]
fn enum_is_case_sensitive() {
    let methods = Checker::enumeration(["GET", "POST", "PUT", "DELETE", "PATCH"]).unwrap();
    param(&methods, &v(json!("GET"))).unwrap();
    assert!(param(&methods, &v(json!("get"))).is_err());
}

#[test]
fn literal_object_mismatch_reports_path() {
    let checker = Checker::literal(json!({"status": "ok", "code": 200})).unwrap();
    param(&checker, &v(json!({"status": "ok", "code": 200}))).unwrap();

    let err = param(&checker, &v(json!({"status": "ok", "code": 201}))).unwrap_err();
    let mut expected_path = ValuePath::root();
    expected_path.push_key("code");
    assert_eq!(
        err,
        ValidationError::LiteralMismatch {
            found: "201".to_string(),
            path: expected_path
        }
    );
    assert_eq!(
        err.to_string(),
        r#"unexpected literal value: 201, at @.["code"]"#
    );

    let err = param(&checker, &v(json!({"status": "ok"}))).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingKey {
            key: "code".to_string()
        }
    );
}

#[test]
fn literal_array_and_primitive() {
    let checker = Checker::literal(json!([1, 2, 3])).unwrap();
    param(&checker, &v(json!([1, 2, 3]))).unwrap();
    let err = param(&checker, &v(json!([1, 2, 4]))).unwrap_err();
    assert_eq!(err.to_string(), "unexpected literal value: 4, at @.[2]");

    let answer = Checker::literal(42).unwrap();
    param(&answer, &v(json!(42))).unwrap();
    let err = param(&answer, &v(json!(43))).unwrap_err();
    assert_eq!(err.to_string(), "unexpected literal value: 43, at @");

    let ok = Checker::literal("ok").unwrap();
    assert!(param(&ok, &v(json!("OK"))).is_err());
}

#[test]
fn union_with_raw_literal() {
    let checker = one_of![NUMBER, "auto"].unwrap();
    param(&checker, &v(json!("auto"))).unwrap();
    param(&checker, &v(json!(7))).unwrap();

    let err = param(&checker, &v(json!("manual"))).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnionExhausted {
            found: r#""manual""#.to_string()
        }
    );
    assert_eq!(err.to_string(), r#"value "manual" is not assignable to union"#);
}

#[test]
fn union_of_literals() {
    let role = one_of!["admin", "user", "guest"].unwrap();
    param(&role, &v(json!("guest"))).unwrap();
    assert!(matches!(
        param(&role, &v(json!("superuser"))),
        Err(ValidationError::UnionExhausted { .. })
    ));
}

#[test]
fn multi_params_arity() {
    let args = [Value::from("Alice")];
    let err = multi_params(&args, &[STRING, NUMBER]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::ArityOutOfRange {
            min: 2,
            max: 2,
            received: 1
        }
    );
    assert_eq!(err.to_string(), "expecting 2-2 arguments, received 1");
}

#[test]
fn multi_params_destructuring() {
    let address = Checker::interface([
        Field::required("street", STRING),
        Field::required("city", STRING),
    ])
    .unwrap();
    let checkers = [
        STRING,
        NUMBER,
        one_of!["admin", "user", "guest"].unwrap(),
        Checker::optional(address),
    ];

    let args = [Value::from("Alice"), Value::from(30), Value::from("admin")];
    let [name, age, role] = multi_params(&args, &checkers).unwrap() else {
        panic!("expected three arguments back");
    };
    assert_eq!(name.as_str(), Some("Alice"));
    assert_eq!(age.as_f64(), Some(30.0));
    assert_eq!(role.as_str(), Some("admin"));

    let args = [
        Value::from("Bob"),
        Value::from(25),
        Value::from("user"),
        v(json!({"street": "1 Main St", "city": "Portland"})),
    ];
    assert_eq!(multi_params(&args, &checkers).unwrap().len(), 4);

    let args = [Value::from("Eve"), Value::from(22), Value::from("superuser")];
    assert!(matches!(
        multi_params(&args, &checkers),
        Err(ValidationError::UnionExhausted { .. })
    ));
}

#[test]
fn key_of_lookup() {
    let theme = Checker::key_of(json!({"light": 1, "dark": 2})).unwrap();
    param(&theme, &v(json!("dark"))).unwrap();

    let err = param(&theme, &v(json!("blue"))).unwrap_err();
    assert_eq!(
        err,
        ValidationError::KeyLookupFailed {
            key: "blue".to_string()
        }
    );
    assert_eq!(err.to_string(), "key blue is invalid");
}

#[test]
fn optional_interface_fields() {
    let config = Checker::interface([
        Field::required("host", STRING),
        Field::required("port", NUMBER),
        Field::optional("ssl", BOOLEAN),
    ])
    .unwrap();
    param(&config, &v(json!({"host": "localhost", "port": 3000}))).unwrap();
    param(&config, &v(json!({"host": "localhost", "port": 3000, "ssl": true}))).unwrap();

    // Present optional fields are checked like required ones.
    let err = param(&config, &v(json!({"host": "h", "port": 1, "ssl": "yes"}))).unwrap_err();
    assert_eq!(err.to_string(), "not a valid boolean type: 'yes'");

    let err = param(&config, &v(json!({"host": "localhost"}))).unwrap_err();
    assert_eq!(err.to_string(), "missing required key: port");
}

#[test]
fn function_primitive() {
    let handler = Value::Function(Callable::new("onClick", |_| Value::Undefined));
    param(&FUNCTION, &handler).unwrap();
    assert!(param(&OBJECT, &handler).is_err());
    assert!(param(&FUNCTION, &v(json!("onClick"))).is_err());
}

#[test]
fn api_response_shape() {
    let item = Checker::interface([
        Field::required("id", NUMBER),
        Field::required("title", STRING),
        Field::optional("labels", Checker::map(STRING)),
    ])
    .unwrap();
    let response = Checker::interface([
        Field::required("status", Checker::enumeration(["ok", "error"]).unwrap()),
        Field::required("data", Checker::array(item)),
        Field::optional("next", Checker::optional(STRING)),
    ])
    .unwrap();

    let body = v(json!({
        "status": "ok",
        "data": [
            {"id": 1, "title": "first"},
            {"id": 2, "title": "second", "labels": {"team": "core"}}
        ],
        "next": null
    }));
    param(&response, &body).unwrap();

    let body = v(json!({
        "status": "ok",
        "data": [{"id": 1, "title": "first", "labels": {"team": 7}}]
    }));
    let err = param(&response, &body).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TypeMismatch {
            expected: "string",
            found: "7".to_string()
        }
    );
}

#[test]
fn validate_method_matches_param() {
    let checker = Checker::array(Checker::array(NUMBER));
    let value = v(json!([[1, 2], [], [3]]));
    assert_eq!(checker.validate(&value), param(&checker, &value));
    assert!(checker.validate(&v(json!([[1, "2"]]))).is_err());
}

#[test]
fn checkers_shared_across_threads() {
    let checker = std::sync::Arc::new(user());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let checker = std::sync::Arc::clone(&checker);
            std::thread::spawn(move || {
                let value = Value::from(json!({"id": i, "name": format!("user-{i}")}));
                param(&checker, &value)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

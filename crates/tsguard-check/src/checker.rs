//! # Checker Descriptors
//!
//! `Checker` is the closed set of validation rules. Composite checkers own
//! their children, so a checker tree is built bottom-up and cannot contain
//! cycles.
//!
//! ## Construction Invariant
//!
//! Payload types (`Interface`, `EnumOptions`, `Literal`, `Union`, `KeyOf`)
//! have private fields. The only way to produce one is through the
//! `Checker` constructors, which validate their arguments eagerly:
//!
//! - interfaces declare at least one field, each name once;
//! - enums offer at least one option, all primitive;
//! - literals capture pure data (no `undefined`, no functions), and their
//!   optional keys name members of an object reference;
//! - unions have at least one alternative;
//! - key-of references are plain objects.
//!
//! A `&Checker` is therefore always a legitimate descriptor; no runtime
//! marker is carried.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tsguard_core::{DefinitionError, ValidationError, Value};

/// Accepts strings.
pub const STRING: Checker = Checker::Primitive(Primitive::String);
/// Accepts numbers.
pub const NUMBER: Checker = Checker::Primitive(Primitive::Number);
/// Accepts booleans.
pub const BOOLEAN: Checker = Checker::Primitive(Primitive::Boolean);
/// Accepts function values.
pub const FUNCTION: Checker = Checker::Primitive(Primitive::Function);
/// Accepts objects. Arrays, `null`, and functions are rejected.
pub const OBJECT: Checker = Checker::Primitive(Primitive::Object);
/// Accepts anything, including `undefined`.
pub const ANY: Checker = Checker::Primitive(Primitive::Any);

/// Built-in value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Function,
    Object,
    Any,
}

impl Primitive {
    /// Resolve a primitive by name. `"func"` is accepted as an alias of
    /// `"function"`.
    pub fn from_name(name: &str) -> Result<Self, DefinitionError> {
        match name {
            "string" => Ok(Primitive::String),
            "number" => Ok(Primitive::Number),
            "boolean" => Ok(Primitive::Boolean),
            "function" | "func" => Ok(Primitive::Function),
            "object" => Ok(Primitive::Object),
            "any" => Ok(Primitive::Any),
            other => Err(DefinitionError::UnknownPrimitive(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Function => "function",
            Primitive::Object => "object",
            Primitive::Any => "any",
        }
    }

    /// Returns true if `value` is of this kind.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Primitive::String => matches!(value, Value::String(_)),
            Primitive::Number => matches!(value, Value::Number(_)),
            Primitive::Boolean => matches!(value, Value::Bool(_)),
            Primitive::Function => matches!(value, Value::Function(_)),
            Primitive::Object => matches!(value, Value::Object(_)),
            Primitive::Any => true,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discriminant of a [`Checker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    Primitive,
    Interface,
    Enum,
    Array,
    Optional,
    Map,
    Literal,
    Union,
    Any,
    KeyOf,
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckerKind::Primitive => "primitive",
            CheckerKind::Interface => "interface",
            CheckerKind::Enum => "enum",
            CheckerKind::Array => "array",
            CheckerKind::Optional => "optional",
            CheckerKind::Map => "map",
            CheckerKind::Literal => "literal",
            CheckerKind::Union => "union",
            CheckerKind::Any => "any",
            CheckerKind::KeyOf => "keyof",
        };
        f.write_str(name)
    }
}

/// One declared field of an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    checker: Checker,
    optional: bool,
}

impl Field {
    /// A field that must be present on every matching object.
    pub fn required(name: impl Into<String>, checker: Checker) -> Self {
        Self {
            name: name.into(),
            checker,
            optional: false,
        }
    }

    /// A field that may be absent. When present it is checked like a
    /// required field.
    pub fn optional(name: impl Into<String>, checker: Checker) -> Self {
        Self {
            name: name.into(),
            checker,
            optional: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn checker(&self) -> &Checker {
        &self.checker
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Exact object shape: a fixed set of fields, each required or optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    fields: Vec<Field>,
}

impl Interface {
    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of the required fields, in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| !f.optional)
            .map(|f| f.name.as_str())
    }
}

/// Allowed primitive values of an enum, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumOptions {
    options: Vec<Value>,
}

impl EnumOptions {
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.options.iter().any(|option| option == value)
    }
}

/// Reference value of a literal checker.
///
/// When the reference is an object, some of its top-level keys may be
/// marked optional: they may be absent from a matching value, and are
/// compared like the other keys when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    reference: Value,
    optional: BTreeSet<String>,
}

impl Literal {
    pub fn reference(&self) -> &Value {
        &self.reference
    }

    /// Top-level keys of the reference object that may be absent.
    pub fn optional_keys(&self) -> &BTreeSet<String> {
        &self.optional
    }

    pub fn is_optional_key(&self, key: &str) -> bool {
        self.optional.contains(key)
    }
}

/// Ordered alternatives of a union.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    alternatives: Vec<Checker>,
}

impl Union {
    pub fn alternatives(&self) -> &[Checker] {
        &self.alternatives
    }
}

/// Reference object of a key-of checker.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOf {
    reference: BTreeMap<String, Value>,
}

impl KeyOf {
    pub fn reference(&self) -> &BTreeMap<String, Value> {
        &self.reference
    }

    pub fn contains(&self, key: &str) -> bool {
        self.reference.contains_key(key)
    }
}

/// One alternative handed to [`Checker::union`]: either a checker or a
/// raw value to be matched as a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Alternative {
    Checker(Checker),
    Literal(Value),
}

impl From<Checker> for Alternative {
    fn from(checker: Checker) -> Self {
        Alternative::Checker(checker)
    }
}

impl From<Primitive> for Alternative {
    fn from(primitive: Primitive) -> Self {
        Alternative::Checker(Checker::Primitive(primitive))
    }
}

impl From<Value> for Alternative {
    fn from(value: Value) -> Self {
        Alternative::Literal(value)
    }
}

macro_rules! impl_literal_alternative {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Alternative {
                fn from(raw: $t) -> Self {
                    Alternative::Literal(Value::from(raw))
                }
            }
        )*
    };
}

impl_literal_alternative!(&str, String, bool, f64, i32, i64);

/// A validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Checker {
    Primitive(Primitive),
    Interface(Interface),
    Enum(EnumOptions),
    Array(Box<Checker>),
    Optional(Box<Checker>),
    Map(Box<Checker>),
    Literal(Literal),
    Union(Union),
    KeyOf(KeyOf),
}

impl Checker {
    /// Exact object shape.
    ///
    /// # Errors
    ///
    /// `EmptyInterface` if no fields are given, `DuplicateField` if a name
    /// is declared twice.
    pub fn interface(fields: impl IntoIterator<Item = Field>) -> Result<Self, DefinitionError> {
        let fields: Vec<Field> = fields.into_iter().collect();
        if fields.is_empty() {
            return Err(DefinitionError::EmptyInterface);
        }
        let mut seen = BTreeSet::new();
        if let Some(duplicate) = fields.iter().find(|f| !seen.insert(f.name.as_str())) {
            return Err(DefinitionError::DuplicateField(duplicate.name.clone()));
        }
        Ok(Checker::Interface(Interface { fields }))
    }

    /// Value must strictly equal one of `values`.
    ///
    /// # Errors
    ///
    /// `EmptyEnum` if no values are given, `NonPrimitiveOption` if a value
    /// is not null, a boolean, a number, or a string.
    pub fn enumeration<V: Into<Value>>(
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self, DefinitionError> {
        let options: Vec<Value> = values.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(DefinitionError::EmptyEnum);
        }
        if let Some(bad) = options.iter().find(|o| !o.is_primitive()) {
            return Err(DefinitionError::NonPrimitiveOption(bad.to_json_string()));
        }
        Ok(Checker::Enum(EnumOptions { options }))
    }

    /// Array whose every element matches `element`.
    pub fn array(element: Checker) -> Self {
        Checker::Array(Box::new(element))
    }

    /// `undefined` or `null`, or a value matching `inner`.
    pub fn optional(inner: Checker) -> Self {
        Checker::Optional(Box::new(inner))
    }

    /// Object with arbitrary keys whose every value matches `values`.
    pub fn map(values: Checker) -> Self {
        Checker::Map(Box::new(values))
    }

    /// Value must deeply equal `reference`.
    ///
    /// # Errors
    ///
    /// `UndefinedLiteral` if `reference` is or contains `undefined` or a
    /// function.
    pub fn literal(reference: impl Into<Value>) -> Result<Self, DefinitionError> {
        Self::literal_with_optional(reference, std::iter::empty::<String>())
    }

    /// Object literal whose `optional` top-level keys may be absent.
    /// Present keys, optional or not, must deeply equal the reference.
    ///
    /// # Errors
    ///
    /// `UndefinedLiteral` as for [`Checker::literal`];
    /// `OptionalKeysOnNonObject` if keys are given for a non-object
    /// reference; `UndeclaredOptionalKey` if a key is not a member of the
    /// reference object.
    pub fn literal_with_optional<K: Into<String>>(
        reference: impl Into<Value>,
        optional: impl IntoIterator<Item = K>,
    ) -> Result<Self, DefinitionError> {
        let reference = reference.into();
        if !reference.is_data() {
            return Err(DefinitionError::UndefinedLiteral(reference.to_json_string()));
        }
        let optional: BTreeSet<String> = optional.into_iter().map(Into::into).collect();
        if !optional.is_empty() {
            let Value::Object(members) = &reference else {
                return Err(DefinitionError::OptionalKeysOnNonObject(
                    reference.to_json_string(),
                ));
            };
            if let Some(undeclared) = optional.iter().find(|key| !members.contains_key(*key)) {
                return Err(DefinitionError::UndeclaredOptionalKey(undeclared.clone()));
            }
        }
        Ok(Checker::Literal(Literal {
            reference,
            optional,
        }))
    }

    /// Value must match at least one alternative. Raw values are wrapped
    /// as literals.
    ///
    /// # Errors
    ///
    /// `EmptyUnion` if no alternatives are given, or the error of a raw
    /// value that is not a valid literal.
    pub fn union<A: Into<Alternative>>(
        alternatives: impl IntoIterator<Item = A>,
    ) -> Result<Self, DefinitionError> {
        let alternatives = alternatives
            .into_iter()
            .map(|alt| match alt.into() {
                Alternative::Checker(checker) => Ok(checker),
                Alternative::Literal(value) => Checker::literal(value),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if alternatives.is_empty() {
            return Err(DefinitionError::EmptyUnion);
        }
        Ok(Checker::Union(Union { alternatives }))
    }

    /// Value must be a string naming an own key of `reference`.
    ///
    /// # Errors
    ///
    /// `KeyOfNotObject` if `reference` is not a plain object.
    pub fn key_of(reference: impl Into<Value>) -> Result<Self, DefinitionError> {
        match reference.into() {
            Value::Object(reference) => Ok(Checker::KeyOf(KeyOf { reference })),
            other => Err(DefinitionError::KeyOfNotObject(other.to_json_string())),
        }
    }

    pub fn kind(&self) -> CheckerKind {
        match self {
            Checker::Primitive(Primitive::Any) => CheckerKind::Any,
            Checker::Primitive(_) => CheckerKind::Primitive,
            Checker::Interface(_) => CheckerKind::Interface,
            Checker::Enum(_) => CheckerKind::Enum,
            Checker::Array(_) => CheckerKind::Array,
            Checker::Optional(_) => CheckerKind::Optional,
            Checker::Map(_) => CheckerKind::Map,
            Checker::Literal(_) => CheckerKind::Literal,
            Checker::Union(_) => CheckerKind::Union,
            Checker::KeyOf(_) => CheckerKind::KeyOf,
        }
    }

    /// Returns true for `Optional` checkers, which do not count towards
    /// the minimum arity of [`crate::multi_params`].
    pub fn is_optional(&self) -> bool {
        matches!(self, Checker::Optional(_))
    }

    /// Validate `value` against this checker. Same as [`crate::param`].
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        crate::params::param(self, value)
    }
}

impl From<Primitive> for Checker {
    fn from(primitive: Primitive) -> Self {
        Checker::Primitive(primitive)
    }
}

/// TypeScript-flavoured rendering, e.g. `{ id: number; tags?: Array<string> }`.
impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checker::Primitive(p) => write!(f, "{p}"),
            Checker::Interface(interface) => {
                f.write_str("{ ")?;
                for (i, field) in interface.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    let mark = if field.optional { "?" } else { "" };
                    write!(f, "{}{mark}: {}", field.name, field.checker)?;
                }
                f.write_str(" }")
            }
            Checker::Enum(options) => {
                let rendered: Vec<String> =
                    options.options.iter().map(Value::to_json_string).collect();
                write!(f, "enum<{}>", rendered.join(" | "))
            }
            Checker::Array(element) => write!(f, "Array<{element}>"),
            Checker::Optional(inner) => write!(f, "{inner} | null | undefined"),
            Checker::Map(values) => write!(f, "Record<string, {values}>"),
            Checker::Literal(literal) => match &literal.reference {
                Value::Object(members) if !literal.optional.is_empty() => {
                    f.write_str("{")?;
                    for (i, (key, member)) in members.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        let mark = if literal.is_optional_key(key) { "?" } else { "" };
                        let quoted = Value::from(key.as_str()).to_json_string();
                        write!(f, "{quoted}{mark}:{}", member.to_json_string())?;
                    }
                    f.write_str("}")
                }
                reference => f.write_str(&reference.to_json_string()),
            },
            Checker::Union(union) => {
                for (i, alt) in union.alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            Checker::KeyOf(key_of) => {
                let keys: Vec<&str> = key_of.reference.keys().map(String::as_str).collect();
                write!(f, "keyof {{ {} }}", keys.join(", "))
            }
        }
    }
}

/// Build a union from a mix of checkers and raw values.
///
/// ```
/// use tsguard_check::{one_of, NUMBER};
///
/// let id = one_of![NUMBER, "auto"].unwrap();
/// assert!(id.validate(&"auto".into()).is_ok());
/// ```
#[macro_export]
macro_rules! one_of {
    ($($alt:expr),+ $(,)?) => {
        $crate::Checker::union([$($crate::Alternative::from($alt)),+])
    };
}

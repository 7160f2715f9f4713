//! Dynamic values checked by the engine.
//!
//! This module provides [`Value`], the runtime representation every descriptor
//! validates, together with [`Class`] and [`Instance`] for nominal
//! (instance-of) checks. Values are owned trees; the absent sentinel
//! ([`Value::Absent`]) is distinct from [`Value::Null`], which is what lets
//! `optional` and `maybe` answer different questions.

use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value as Json;

/// A dynamic runtime value.
///
/// Object fields keep insertion order, so validation visits keys in
/// enumeration order and failure lists are deterministic.
///
/// # Example
///
/// ```rust
/// use typegate::Value;
/// use serde_json::json;
///
/// let v = Value::from(json!({"name": "Alice", "tags": ["admin"]}));
/// assert!(v.get("name").is_some());
/// assert!(v.get("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent sentinel (undefined-equivalent). Distinct from `Null`.
    Absent,
    /// The null sentinel.
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    /// A keyed map with insertion-ordered fields.
    Object(IndexMap<String, Value>),
    /// A callable value, carried as a display name and arity.
    Function(FunctionValue),
    /// A regular-expression value.
    Regex(RegexValue),
    /// An instance of a nominal [`Class`].
    Instance(Instance),
}

impl Value {
    /// Creates a named function value with the given arity.
    pub fn function(name: impl Into<String>, arity: usize) -> Self {
        Value::Function(FunctionValue {
            name: Some(name.into()),
            arity,
        })
    }

    /// Creates an anonymous function value with the given arity.
    pub fn anonymous_function(arity: usize) -> Self {
        Value::Function(FunctionValue { name: None, arity })
    }

    /// Creates a regular-expression value from a pattern.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Value::Regex(RegexValue {
            inner: Regex::new(pattern)?,
        }))
    }

    /// Returns true if this value is the absent sentinel.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Returns true if this value is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the elements if this value is array-kind.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the keyed fields if this value is object-kind.
    ///
    /// Both plain objects and class instances are object-kind; arrays,
    /// functions and regex values are not.
    pub fn as_entries(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            Value::Instance(instance) => Some(&instance.fields),
            _ => None,
        }
    }

    /// Looks up an own key on an object-kind value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_entries().and_then(|fields| fields.get(key))
    }

    /// Projects this value into a `serde_json::Value` for stringification.
    ///
    /// Function and regex values become bracketed tag strings, non-finite
    /// numbers become null, and the absent sentinel becomes null (a
    /// top-level absent value is rendered separately by failure reporting).
    pub fn to_json(&self) -> Json {
        match self {
            Value::Absent | Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => json_number(*n),
            Value::Str(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Function(f) => Json::String(format!("[{}, Function]", f.display_name())),
            Value::Regex(r) => Json::String(format!("[/{}/, RegExp]", r.as_str())),
            Value::Instance(instance) => Json::Object(
                instance
                    .fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn json_number(n: f64) -> Json {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Json::Number(serde_json::Number::from(n as i64))
    } else {
        serde_json::Number::from_f64(n)
            .map(Json::Number)
            .unwrap_or(Json::Null)
    }
}

pub(crate) fn fmt_f64(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", fmt_f64(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "[{}, Function]", func.display_name()),
            Value::Regex(r) => write!(f, "[/{}/, RegExp]", r.as_str()),
            Value::Instance(instance) => write!(f, "[{}]", instance.class.name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<Json> for Value {
    /// Converts a JSON document into a dynamic value.
    ///
    /// JSON null maps to [`Value::Null`], never to the absent sentinel;
    /// absence only arises from missing keys during validation.
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A callable value: a display name (if any) and an arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionValue {
    name: Option<String>,
    arity: usize,
}

impl FunctionValue {
    /// The name used in diagnostics: the declared name, or `<functionN>` for
    /// an anonymous function of arity N.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("<function{}>", self.arity),
        }
    }

    /// Returns the declared parameter count.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// A regular-expression value.
///
/// Equality compares the source pattern, since compiled programs for the
/// same pattern are interchangeable.
#[derive(Debug, Clone)]
pub struct RegexValue {
    inner: Regex,
}

impl RegexValue {
    /// Returns the source pattern.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Returns true if the pattern matches the given text.
    pub fn is_match(&self, text: &str) -> bool {
        self.inner.is_match(text)
    }
}

impl PartialEq for RegexValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A runtime handle for a nominal class.
///
/// Classes form single-parent chains; [`Class::is_instance`] mirrors a host
/// language's `instanceof` by walking the chain of the value's class. Two
/// handles are equal only if they are the same registration, regardless of
/// name.
///
/// # Example
///
/// ```rust
/// use typegate::{Class, Value};
///
/// let animal = Class::new("Animal");
/// let dog = animal.subclass("Dog");
///
/// let rex = Value::from(dog.instance().field("name", "Rex"));
/// assert!(dog.is_instance(&rex));
/// assert!(animal.is_instance(&rex));
/// assert!(!Class::new("Animal").is_instance(&rex));
/// ```
#[derive(Debug, Clone)]
pub struct Class {
    inner: Arc<ClassInner>,
}

#[derive(Debug)]
struct ClassInner {
    name: String,
    parent: Option<Class>,
}

impl Class {
    /// Creates a new root class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                name: name.into(),
                parent: None,
            }),
        }
    }

    /// Creates a class whose parent is this class.
    pub fn subclass(&self, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                name: name.into(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Creates an empty instance of this class.
    pub fn instance(&self) -> Instance {
        Instance {
            class: self.clone(),
            fields: IndexMap::new(),
        }
    }

    /// Returns true if `value` is an instance of this class or of one of its
    /// subclasses.
    pub fn is_instance(&self, value: &Value) -> bool {
        match value {
            Value::Instance(instance) => {
                let mut current = Some(instance.class.clone());
                while let Some(class) = current {
                    if class == *self {
                        return true;
                    }
                    current = class.inner.parent.clone();
                }
                false
            }
            _ => false,
        }
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Class {}

/// An instance of a nominal class, with insertion-ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: Class,
    fields: IndexMap<String, Value>,
}

impl Instance {
    /// Adds a field and returns self for chaining.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the instance's class.
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Returns the instance's fields.
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

// Values are shared across threads during concurrent validation.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Value>();
    assert_sync::<Value>();
    assert_send::<Class>();
    assert_sync::<Class>();
};

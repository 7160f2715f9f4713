//! Irreducible type descriptors.
//!
//! Each primitive is built through [`define`], which pairs a stable name with
//! a predicate. The stock primitives are process-lifetime singletons; the
//! constructors return cheap clones of them.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{Type, TypeKind};
use crate::value::Value;

/// Builds an irreducible descriptor from a name and a predicate.
///
/// The resulting descriptor succeeds when the predicate holds and otherwise
/// reports a single failure at the incoming context.
///
/// # Example
///
/// ```rust
/// use typegate::{define, Value};
///
/// let even = define("even", |v| matches!(v, Value::Number(n) if n % 2.0 == 0.0));
/// assert!(even.is(&Value::from(4i64)));
/// assert!(!even.is(&Value::from(3i64)));
/// ```
pub fn define(name: impl Into<String>, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Type {
    Type::new(name, TypeKind::Irreducible(Arc::new(predicate)))
}

static ANY: Lazy<Type> = Lazy::new(|| define("any", |_| true));
static MIXED: Lazy<Type> = Lazy::new(|| define("mixed", |_| true));
static VOID: Lazy<Type> = Lazy::new(|| define("void", Value::is_absent));
static STRING: Lazy<Type> = Lazy::new(|| define("string", |v| matches!(v, Value::Str(_))));
static NUMBER: Lazy<Type> =
    Lazy::new(|| define("number", |v| matches!(v, Value::Number(n) if n.is_finite())));
static BOOLEAN: Lazy<Type> = Lazy::new(|| define("boolean", |v| matches!(v, Value::Bool(_))));
static ARRAY: Lazy<Type> = Lazy::new(|| define("array", |v| matches!(v, Value::Array(_))));
static OBJECT: Lazy<Type> = Lazy::new(|| define("object", |v| v.as_entries().is_some()));
static FUNCTION: Lazy<Type> =
    Lazy::new(|| define("function", |v| matches!(v, Value::Function(_))));

/// Accepts every value.
pub fn any() -> Type {
    ANY.clone()
}

/// Accepts every value.
pub fn mixed() -> Type {
    MIXED.clone()
}

/// Accepts only the absent sentinel.
pub fn void_() -> Type {
    VOID.clone()
}

/// Accepts string values.
pub fn string() -> Type {
    STRING.clone()
}

/// Accepts finite numbers. NaN and the infinities are rejected.
pub fn number() -> Type {
    NUMBER.clone()
}

/// Accepts exactly `true` or `false`.
pub fn boolean() -> Type {
    BOOLEAN.clone()
}

/// Accepts array values.
pub fn array() -> Type {
    ARRAY.clone()
}

/// Accepts keyed values: plain objects and class instances. Null, the
/// absent sentinel, arrays, functions and regex values are rejected.
pub fn object() -> Type {
    OBJECT.clone()
}

/// Accepts callable values.
pub fn function() -> Type {
    FUNCTION.clone()
}

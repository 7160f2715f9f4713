//! Composite type descriptors.
//!
//! Combinators build new descriptors out of existing ones: homogeneous
//! lists, absence/null wrappers, positional tuples, keyed dictionaries,
//! structural shapes, unions, and function-argument signatures. Every
//! combinator synthesizes a canonical default name from its constituents
//! (override with [`Type::named`]) and extends the validation context as it
//! descends, so failure reports pinpoint the nested location.
//!
//! # Example
//!
//! ```rust
//! use typegate::{number, shape, string, tuple, union, Value};
//! use serde_json::json;
//!
//! let point = shape([("x", number()), ("y", number())]);
//! assert_eq!(point.name(), "{x: number; y: number;}");
//!
//! let pair = tuple([string(), number()]);
//! assert!(pair.is(&Value::from(json!(["s", 1]))));
//!
//! let id = union([string(), number()]);
//! assert_eq!(id.name(), "string | number");
//! assert!(!id.is(&Value::from(true)));
//! ```

use indexmap::IndexMap;
use stillwater::Validation;

use super::primitive;
use super::{Descriptor, Type, TypeKind};
use crate::dispatch::{self, Mode};
use crate::error::{Failure, Failures};
use crate::path::Context;
use crate::value::Value;
use crate::ValidationResult;

static ABSENT: Value = Value::Absent;

/// Homogeneous list: array-kind, every element satisfies `of`.
///
/// Element failures carry the element index in their context. In collect
/// mode all element failures are aggregated; in fail-fast mode the first is
/// returned.
///
/// ```rust
/// use typegate::{list, number};
///
/// assert_eq!(list(number()).name(), "Array<number>");
/// ```
pub fn list(of: impl Into<Descriptor>) -> Type {
    let of = of.into();
    let name = format!("Array<{}>", of.name());
    Type::new(name, TypeKind::List(of))
}

/// Absence wrapper: the absent sentinel is valid, anything else must
/// satisfy `of`.
///
/// `optional` answers "was this key provided"; [`maybe`] answers "is this
/// value nullable". They are distinct wrappers.
pub fn optional(of: impl Into<Descriptor>) -> Type {
    let of = of.into();
    let name = format!("{}?", of.name());
    Type::new(name, TypeKind::Optional(of))
}

/// Null wrapper: the null sentinel is valid, anything else must satisfy
/// `of`. The absent sentinel is not null and is delegated to `of`.
pub fn maybe(of: impl Into<Descriptor>) -> Type {
    let of = of.into();
    let name = format!("?{}", of.name());
    Type::new(name, TypeKind::Maybe(of))
}

/// Positional tuple: array-kind of exactly `types.len()` elements, each
/// validated against its positional descriptor.
///
/// A wrong-length value fails against the tuple descriptor itself, not
/// against any element.
pub fn tuple<I, D>(types: I) -> Type
where
    I: IntoIterator<Item = D>,
    D: Into<Descriptor>,
{
    let types: Vec<Descriptor> = types.into_iter().map(Into::into).collect();
    let name = tuple_name(&types);
    Type::new(name, TypeKind::Tuple(types))
}

fn tuple_name(types: &[Descriptor]) -> String {
    let parts: Vec<&str> = types.iter().map(Descriptor::name).collect();
    format!("[{}]", parts.join(", "))
}

/// Keyed dictionary: object-kind where every own key satisfies `domain`
/// (checked as a string value) and every associated value satisfies
/// `codomain`. The empty object is vacuously valid.
pub fn dict(domain: impl Into<Descriptor>, codomain: impl Into<Descriptor>) -> Type {
    let domain = domain.into();
    let codomain = codomain.into();
    let name = format!("{{[key: {}]: {}}}", domain.name(), codomain.name());
    Type::new(name, TypeKind::Dict { domain, codomain })
}

/// Structural shape: object-kind where each declared property satisfies its
/// descriptor. A missing key yields the absent sentinel, which fails unless
/// the property descriptor tolerates absence (e.g. is [`optional`]). Extra
/// own properties are permitted and ignored.
pub fn shape<I, K, D>(props: I) -> Type
where
    I: IntoIterator<Item = (K, D)>,
    K: Into<String>,
    D: Into<Descriptor>,
{
    let props: IndexMap<String, Descriptor> = props
        .into_iter()
        .map(|(k, d)| (k.into(), d.into()))
        .collect();
    let parts: Vec<String> = props
        .iter()
        .map(|(k, d)| format!("{}: {};", k, d.name()))
        .collect();
    let name = format!("{{{}}}", parts.join(" "));
    Type::new(name, TypeKind::Shape(props))
}

/// Union: valid if any constituent accepts the value, tested with each
/// constituent's fast membership check. When none accepts, the single
/// failure references the union itself, not a per-branch breakdown.
pub fn union<I, D>(types: I) -> Type
where
    I: IntoIterator<Item = D>,
    D: Into<Descriptor>,
{
    let types: Vec<Descriptor> = types.into_iter().map(Into::into).collect();
    let parts: Vec<&str> = types.iter().map(Descriptor::name).collect();
    let name = parts.join(" | ");
    Type::new(name, TypeKind::Union(types))
}

/// Function-argument signature with no variadic part.
///
/// The argument array is truncated to the declared count (extra positional
/// arguments are tolerated and ignored) and padded with the absent sentinel
/// when short, then validated as a tuple at path segment `arguments`.
pub fn args<I, D>(types: I) -> Type
where
    I: IntoIterator<Item = D>,
    D: Into<Descriptor>,
{
    build_args(types.into_iter().map(Into::into).collect(), None)
}

/// Function-argument signature with a variadic part: arguments beyond the
/// declared count are validated as a list of `varargs` at path segment
/// `varargs`.
pub fn args_varargs<I, D>(types: I, varargs: impl Into<Descriptor>) -> Type
where
    I: IntoIterator<Item = D>,
    D: Into<Descriptor>,
{
    build_args(types.into_iter().map(Into::into).collect(), Some(varargs.into()))
}

fn build_args(types: Vec<Descriptor>, varargs: Option<Descriptor>) -> Type {
    let parts: Vec<&str> = types.iter().map(Descriptor::name).collect();
    let rest_name = varargs
        .as_ref()
        .map(|d| d.name().to_string())
        .unwrap_or_else(|| "any".to_string());
    let name = format!("({}, ...{})", parts.join(", "), rest_name);

    let arity = types.len();
    let tuple = tuple(types);
    let varargs = varargs.map(list);
    Type::new(
        name,
        TypeKind::Args {
            tuple,
            arity,
            varargs,
        },
    )
}

fn finish(failures: Vec<Failure<'_>>) -> ValidationResult<'_> {
    if failures.is_empty() {
        Validation::Success(())
    } else {
        Validation::Failure(Failures::from_vec(failures))
    }
}

pub(crate) fn validate_list<'v>(
    ty: &Type,
    elem: &Descriptor,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    let named = ctx.push_name(ty.name());
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            return Validation::Failure(Failures::single(Failure::new(
                value,
                primitive::array(),
                named,
            )))
        }
    };

    let mut failures: Vec<Failure<'v>> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match dispatch::validate_descriptor(item, elem, &named.push_index(i), mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                failures.extend(sub);
            }
        }
    }
    finish(failures)
}

pub(crate) fn validate_optional<'v>(
    ty: &Type,
    inner: &Descriptor,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    if value.is_absent() {
        return Validation::Success(());
    }
    dispatch::validate_descriptor(value, inner, &ctx.push_name(ty.name()), mode)
}

pub(crate) fn validate_maybe<'v>(
    ty: &Type,
    inner: &Descriptor,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    if value.is_null() {
        return Validation::Success(());
    }
    dispatch::validate_descriptor(value, inner, &ctx.push_name(ty.name()), mode)
}

pub(crate) fn validate_tuple<'v>(
    ty: &Type,
    types: &[Descriptor],
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            return Validation::Failure(Failures::single(Failure::new(
                value,
                primitive::array(),
                ctx.push_name(ty.name()),
            )))
        }
    };
    // A wrong-length tuple fails as a whole; there is no element to blame.
    if items.len() != types.len() {
        return Validation::Failure(Failures::single(Failure::new(
            value,
            ty.clone(),
            ctx.clone(),
        )));
    }

    let named = ctx.push_name(ty.name());
    let mut failures: Vec<Failure<'v>> = Vec::new();
    for (i, (item, expected)) in items.iter().zip(types).enumerate() {
        match dispatch::validate_descriptor(item, expected, &named.push_index(i), mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                failures.extend(sub);
            }
        }
    }
    finish(failures)
}

pub(crate) fn validate_dict<'v>(
    ty: &Type,
    domain: &Descriptor,
    codomain: &Descriptor,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    let entries = match value.as_entries() {
        Some(entries) => entries,
        None => {
            return Validation::Failure(Failures::single(Failure::new(
                value,
                primitive::object(),
                ctx.push_name(ty.name()),
            )))
        }
    };

    let named = ctx.push_name(ty.name());
    let mut failures: Vec<Failure<'v>> = Vec::new();
    for (key, entry) in entries {
        let key_ctx = named.push_name(key.as_str());

        // The key itself is checked as a string value against the domain.
        let key_value = Value::Str(key.clone());
        match dispatch::validate_descriptor(&key_value, domain, &key_ctx, mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                let sub = sub.into_owned();
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                for failure in sub {
                    failures.push(failure);
                }
            }
        }

        match dispatch::validate_descriptor(entry, codomain, &key_ctx, mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                failures.extend(sub);
            }
        }
    }
    finish(failures)
}

pub(crate) fn validate_shape<'v>(
    ty: &Type,
    props: &IndexMap<String, Descriptor>,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    if value.as_entries().is_none() {
        return Validation::Failure(Failures::single(Failure::new(
            value,
            primitive::object(),
            ctx.push_name(ty.name()),
        )));
    }

    let named = ctx.push_name(ty.name());
    let mut failures: Vec<Failure<'v>> = Vec::new();
    for (key, expected) in props {
        let field = value.get(key).unwrap_or(&ABSENT);
        match dispatch::validate_descriptor(field, expected, &named.push_name(key.as_str()), mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                failures.extend(sub);
            }
        }
    }
    finish(failures)
}

pub(crate) fn validate_union<'v>(
    ty: &Type,
    types: &[Descriptor],
    value: &'v Value,
    ctx: &Context,
) -> ValidationResult<'v> {
    if types.iter().any(|t| t.is(value)) {
        return Validation::Success(());
    }
    Validation::Failure(Failures::single(Failure::new(
        value,
        ty.clone(),
        ctx.push_name(ty.name()),
    )))
}

pub(crate) fn validate_args<'v>(
    tuple: &Type,
    arity: usize,
    varargs: Option<&Type>,
    value: &'v Value,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return tuple.validate(value, &ctx.push_name("arguments"), mode),
    };

    // Truncate extra positional arguments, pad missing ones with the absent
    // sentinel, then check the adjusted arguments as the declared tuple.
    let mut adjusted: Vec<Value> = items.iter().take(arity).cloned().collect();
    adjusted.resize(arity, Value::Absent);
    let adjusted = Value::Array(adjusted);

    let mut failures: Vec<Failure<'v>> = Vec::new();
    match tuple.validate(&adjusted, &ctx.push_name("arguments"), mode) {
        Validation::Success(()) => {}
        Validation::Failure(sub) => {
            let sub = sub.into_owned();
            if mode == Mode::FailFast {
                return Validation::Failure(sub);
            }
            for failure in sub {
                failures.push(failure);
            }
        }
    }

    if let Some(rest) = varargs {
        let trailing = Value::Array(items.iter().skip(arity).cloned().collect());
        match rest.validate(&trailing, &ctx.push_name("varargs"), mode) {
            Validation::Success(()) => {}
            Validation::Failure(sub) => {
                let sub = sub.into_owned();
                if mode == Mode::FailFast {
                    return Validation::Failure(sub);
                }
                for failure in sub {
                    failures.push(failure);
                }
            }
        }
    }
    finish(failures)
}

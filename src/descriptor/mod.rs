//! Type descriptors: the composable unit of validation.
//!
//! A [`Type`] is a named, immutable validator over dynamic values. Primitives
//! come from [`primitive`]; composite descriptors come from [`combinators`].
//! [`Descriptor`] is the tagged sum the dispatcher and every combinator
//! constituent use: a structural [`Type`] or a nominal [`Class`] checked by
//! instance-of.

pub mod combinators;
pub mod primitive;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::Validation;

use crate::dispatch::Mode;
use crate::error::{Failure, Failures};
use crate::path::Context;
use crate::value::{Class, Value};
use crate::ValidationResult;

/// Predicate over dynamic values, stored by irreducible descriptors.
pub(crate) type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Validation behavior of a descriptor, one case per combinator.
pub(crate) enum TypeKind {
    Irreducible(Predicate),
    List(Descriptor),
    Optional(Descriptor),
    Maybe(Descriptor),
    Tuple(Vec<Descriptor>),
    Dict {
        domain: Descriptor,
        codomain: Descriptor,
    },
    Shape(IndexMap<String, Descriptor>),
    Union(Vec<Descriptor>),
    Args {
        tuple: Type,
        arity: usize,
        varargs: Option<Type>,
    },
}

/// A named, immutable, composable type descriptor.
///
/// Descriptors are constructed once, are pure functions of their inputs, and
/// are cheap to clone and share (the behavior is reference-counted). Renaming
/// with [`Type::named`] affects diagnostics and context segments but not
/// behavior.
///
/// # Example
///
/// ```rust
/// use typegate::{list, number, Value};
/// use serde_json::json;
///
/// let ids = list(number());
/// assert_eq!(ids.name(), "Array<number>");
/// assert!(ids.is(&Value::from(json!([1, 2, 3]))));
/// assert!(!ids.is(&Value::from(json!([1, "a"]))));
/// ```
#[derive(Clone)]
pub struct Type {
    name: Arc<str>,
    kind: Arc<TypeKind>,
}

impl Type {
    pub(crate) fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: Arc::from(name.into()),
            kind: Arc::new(kind),
        }
    }

    /// The human-readable type name, used in diagnostics and as a context
    /// segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this descriptor under a new name.
    ///
    /// ```rust
    /// use typegate::{list, number};
    ///
    /// let ids = list(number()).named("IdList");
    /// assert_eq!(ids.name(), "IdList");
    /// ```
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Arc::from(name.into());
        self
    }

    /// Fast membership test: validates in fail-fast mode and discards the
    /// report.
    pub fn is(&self, value: &Value) -> bool {
        self.validate(value, &Context::root(), Mode::FailFast)
            .is_success()
    }

    /// Validates a value against this descriptor.
    ///
    /// In [`Mode::FailFast`] the first mismatch is returned immediately; in
    /// [`Mode::Collect`] all mismatches across all children are concatenated
    /// in declaration order.
    pub fn validate<'v>(&self, value: &'v Value, ctx: &Context, mode: Mode) -> ValidationResult<'v> {
        match &*self.kind {
            TypeKind::Irreducible(predicate) => {
                if predicate(value) {
                    Validation::Success(())
                } else {
                    Validation::Failure(Failures::single(Failure::new(
                        value,
                        self.clone(),
                        ctx.clone(),
                    )))
                }
            }
            TypeKind::List(elem) => combinators::validate_list(self, elem, value, ctx, mode),
            TypeKind::Optional(inner) => {
                combinators::validate_optional(self, inner, value, ctx, mode)
            }
            TypeKind::Maybe(inner) => combinators::validate_maybe(self, inner, value, ctx, mode),
            TypeKind::Tuple(types) => combinators::validate_tuple(self, types, value, ctx, mode),
            TypeKind::Dict { domain, codomain } => {
                combinators::validate_dict(self, domain, codomain, value, ctx, mode)
            }
            TypeKind::Shape(props) => combinators::validate_shape(self, props, value, ctx, mode),
            TypeKind::Union(types) => combinators::validate_union(self, types, value, ctx),
            TypeKind::Args {
                tuple,
                arity,
                varargs,
            } => combinators::validate_args(tuple, *arity, varargs.as_ref(), value, ctx, mode),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// What a value can be validated against: a structural descriptor or a
/// nominal class.
///
/// The dispatcher and every combinator constituent accept either kind, so
/// unions, lists and shapes mix structural and nominal members freely.
#[derive(Debug, Clone)]
pub enum Descriptor {
    /// A structural [`Type`]; validation recurses through its behavior.
    Structural(Type),
    /// A nominal [`Class`]; validation is an instance-of check.
    Nominal(Class),
}

impl Descriptor {
    /// The descriptor's name.
    pub fn name(&self) -> &str {
        match self {
            Descriptor::Structural(ty) => ty.name(),
            Descriptor::Nominal(class) => class.name(),
        }
    }

    /// Fast membership test.
    pub fn is(&self, value: &Value) -> bool {
        match self {
            Descriptor::Structural(ty) => ty.is(value),
            Descriptor::Nominal(class) => class.is_instance(value),
        }
    }
}

impl From<Type> for Descriptor {
    fn from(ty: Type) -> Self {
        Descriptor::Structural(ty)
    }
}

impl From<Class> for Descriptor {
    fn from(class: Class) -> Self {
        Descriptor::Nominal(class)
    }
}

// Descriptors are shared freely across validations and threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Type>();
    assert_sync::<Type>();
    assert_send::<Descriptor>();
    assert_sync::<Descriptor>();
};

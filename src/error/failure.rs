//! Validation failure reports.
//!
//! This module provides [`Failure`] for a single mismatch and [`Failures`]
//! for a non-empty, ordered collection of mismatches. An empty failure list
//! is not representable; success is expressed by the surrounding
//! `Validation` sum instead.

use std::borrow::Cow;
use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::descriptor::Descriptor;
use crate::path::Context;
use crate::value::Value;

/// A single validation mismatch: the offending value, the descriptor it
/// failed against, and where in the structure it was found.
///
/// The offending value is borrowed from the value under validation in the
/// ordinary case; it is owned only when the engine had to synthesize a
/// transient value (a dict key checked as a value, a padded argument array).
///
/// # Example
///
/// ```rust
/// use typegate::{list, number, validate, Context, Mode, Value};
/// use serde_json::json;
/// use stillwater::Validation;
///
/// let value = Value::from(json!([1, "s"]));
/// let result = validate(&value, list(number()), &Context::root(), Mode::Collect);
///
/// if let Validation::Failure(failures) = result {
///     assert_eq!(
///         failures.first().to_string(),
///         "Expected an instance of number got \"s\", context: Array<number> / 1"
///     );
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Failure<'v> {
    actual: Cow<'v, Value>,
    expected: Descriptor,
    context: Context,
}

impl<'v> Failure<'v> {
    /// Creates a failure borrowing the offending value.
    pub fn new(actual: &'v Value, expected: impl Into<Descriptor>, context: Context) -> Self {
        Self {
            actual: Cow::Borrowed(actual),
            expected: expected.into(),
            context,
        }
    }

    /// The offending value.
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// The descriptor the value failed against.
    pub fn expected(&self) -> &Descriptor {
        &self.expected
    }

    /// The location of the mismatch.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Detaches the failure from the value it borrows.
    pub fn into_owned(self) -> Failure<'static> {
        Failure {
            actual: Cow::Owned(self.actual.into_owned()),
            expected: self.expected,
            context: self.context,
        }
    }

    /// Renders a value for inclusion in a failure message.
    ///
    /// Never panics: function and regex values (at any depth) render as
    /// bracketed tags, a top-level absent value renders as `undefined`, and
    /// any serializer error falls back to the value's plain display form.
    pub fn stringify(value: &Value) -> String {
        if value.is_absent() {
            return "undefined".to_string();
        }
        serde_json::to_string(&value.to_json()).unwrap_or_else(|_| value.to_string())
    }
}

impl Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected an instance of {} got {}",
            self.expected.name(),
            Self::stringify(&self.actual)
        )?;
        if self.context.is_empty() {
            write!(f, ", (no context)")
        } else {
            write!(f, ", context: {}", self.context)
        }
    }
}

/// A non-empty, ordered collection of validation failures.
///
/// `Failures` wraps a `NonEmptyVec<Failure>` so a `Validation::Failure`
/// always carries at least one mismatch. It implements `Semigroup`, which is
/// how collect-mode traversal concatenates sub-failures while preserving
/// declaration order.
#[derive(Debug, Clone)]
pub struct Failures<'v>(NonEmptyVec<Failure<'v>>);

impl<'v> Failures<'v> {
    /// Creates a `Failures` containing a single failure.
    pub fn single(failure: Failure<'v>) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a `Failures` from a `Vec` of failures.
    ///
    /// # Panics
    ///
    /// Panics if the vec is empty. Callers accumulate at least one failure
    /// before constructing.
    pub fn from_vec(failures: Vec<Failure<'v>>) -> Self {
        Self(NonEmptyVec::from_vec(failures).expect("Failures requires at least one failure"))
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the failures, in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Failure<'v>> {
        self.0.iter()
    }

    /// Returns the first failure.
    pub fn first(&self) -> &Failure<'v> {
        self.0.head()
    }

    /// Converts into a plain `Vec` of failures.
    pub fn into_vec(self) -> Vec<Failure<'v>> {
        self.0.into_vec()
    }

    /// Detaches every failure from the value it borrows.
    pub fn into_owned(self) -> Failures<'static> {
        Failures::from_vec(self.into_vec().into_iter().map(Failure::into_owned).collect())
    }
}

impl Semigroup for Failures<'_> {
    fn combine(self, other: Self) -> Self {
        Failures(self.0.combine(other.0))
    }
}

impl Display for Failures<'_> {
    /// Renders the failures joined by newlines, in traversal order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl<'v> IntoIterator for Failures<'v> {
    type Item = Failure<'v>;
    type IntoIter = std::vec::IntoIter<Failure<'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Failures cross thread boundaries in batch validation.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failure<'static>>();
    assert_sync::<Failure<'static>>();
    assert_send::<Failures<'static>>();
    assert_sync::<Failures<'static>>();
};

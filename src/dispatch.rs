//! The validation dispatcher.
//!
//! [`validate`] is the single entry point that can invoke any descriptor:
//! structural descriptors recurse through their behavior, nominal classes
//! are checked by instance-of. The traversal [`Mode`] is threaded unchanged
//! through every recursive call.

use stillwater::Validation;

use crate::descriptor::Descriptor;
use crate::error::{Failure, Failures};
use crate::path::Context;
use crate::value::Value;
use crate::ValidationResult;

/// Traversal policy for a validation walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Stop at the first failure, short-circuiting unchecked siblings.
    FailFast,
    /// Aggregate all failures across all children, preserving left-to-right,
    /// depth-first declaration order.
    Collect,
}

/// Validates a value against a structural descriptor or a nominal class.
///
/// This is the non-throwing inspection API: it always returns data, never
/// panics on user input. Use [`crate::check`] for the asserting variant.
///
/// # Example
///
/// ```rust
/// use typegate::{number, shape, validate, Context, Mode, Value};
/// use serde_json::json;
/// use stillwater::Validation;
///
/// let point = shape([("x", number()), ("y", number())]);
/// let value = Value::from(json!({"x": true, "y": "s"}));
///
/// // Collect mode reports both mismatches, in declaration order.
/// let result = validate(&value, point.clone(), &Context::root(), Mode::Collect);
/// if let Validation::Failure(failures) = result {
///     assert_eq!(failures.len(), 2);
/// }
///
/// // Fail-fast mode stops at the first.
/// let result = validate(&value, point, &Context::root(), Mode::FailFast);
/// if let Validation::Failure(failures) = result {
///     assert_eq!(failures.len(), 1);
/// }
/// ```
pub fn validate<'v, D>(value: &'v Value, expected: D, ctx: &Context, mode: Mode) -> ValidationResult<'v>
where
    D: Into<Descriptor>,
{
    let expected = expected.into();
    validate_descriptor(value, &expected, ctx, mode)
}

pub(crate) fn validate_descriptor<'v>(
    value: &'v Value,
    expected: &Descriptor,
    ctx: &Context,
    mode: Mode,
) -> ValidationResult<'v> {
    match expected {
        Descriptor::Structural(ty) => ty.validate(value, ctx, mode),
        Descriptor::Nominal(class) => {
            if class.is_instance(value) {
                Validation::Success(())
            } else {
                Validation::Failure(Failures::single(Failure::new(
                    value,
                    class.clone(),
                    ctx.clone(),
                )))
            }
        }
    }
}

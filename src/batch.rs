//! Parallel batch validation.
//!
//! Descriptors are immutable and safely shared, so independent values can be
//! validated in parallel. Each per-value validation remains a synchronous
//! depth-first walk; only the fan-out across values is parallel, and result
//! order matches input order.

use rayon::prelude::*;

use crate::descriptor::Descriptor;
use crate::dispatch::{validate_descriptor, Mode};
use crate::path::Context;
use crate::value::Value;
use crate::ValidationResult;

/// Validates every value in the slice against the descriptor, in parallel.
///
/// Each value is validated in collect mode with an empty context. The
/// returned results are in input order.
///
/// # Example
///
/// ```rust
/// use typegate::batch::validate_all;
/// use typegate::{number, Descriptor, Value};
///
/// let values = vec![Value::from(1i64), Value::from("s"), Value::from(3i64)];
/// let results = validate_all(&values, &Descriptor::from(number()));
///
/// assert!(results[0].is_success());
/// assert!(results[1].is_failure());
/// assert!(results[2].is_success());
/// ```
pub fn validate_all<'v>(values: &'v [Value], expected: &Descriptor) -> Vec<ValidationResult<'v>> {
    values
        .par_iter()
        .map(|value| validate_descriptor(value, expected, &Context::root(), Mode::Collect))
        .collect()
}

/// Returns true if every value in the slice satisfies the descriptor.
///
/// Uses the fast membership test per value; values are checked in parallel.
pub fn is_all(values: &[Value], expected: &Descriptor) -> bool {
    values.par_iter().all(|value| expected.is(value))
}

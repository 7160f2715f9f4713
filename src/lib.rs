//! # Typegate
//!
//! A structural runtime type-validation engine: composable type descriptors
//! that check whether a dynamic value conforms to a declared shape and
//! produce precise, path-annotated failure reports when it does not.
//!
//! ## Overview
//!
//! Descriptors compose recursively: primitives (`string`, `number`, ...)
//! feed combinators (`list`, `tuple`, `dict`, `shape`, `union`, ...), and a
//! descriptor tree built once validates any number of values. Validation
//! supports two traversal policies without duplicated logic: stop at the
//! first failure ([`Mode::FailFast`], backing [`Type::is`]) or aggregate
//! every failure in declaration order ([`Mode::Collect`], backing [`check`]).
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic value being validated
//! - [`Type`]: a named, immutable, composable descriptor
//! - [`Descriptor`]: structural type or nominal [`Class`], validated uniformly
//! - [`Context`]: the path to a value inside the structure being validated
//! - [`Failure`] / [`Failures`]: one mismatch, and a non-empty ordered report
//! - [`CheckError`]: the assertion gate's error, one failure per line
//!
//! ## Example
//!
//! ```rust
//! use typegate::{check, list, number, shape, string, Value};
//! use serde_json::json;
//!
//! let user = shape([
//!     ("name", string()),
//!     ("scores", list(number())),
//! ]);
//!
//! // Extra keys are tolerated: shapes are structural, not exact.
//! let ok = Value::from(json!({"name": "Alice", "scores": [9, 7], "extra": true}));
//! assert!(user.is(&ok));
//!
//! let bad = Value::from(json!({"name": "Alice", "scores": [9, "seven"]}));
//! let err = check(&bad, user).unwrap_err();
//! assert!(err.message().contains("Expected an instance of number"));
//! ```

pub mod check;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod path;
pub mod registry;
pub mod value;

#[cfg(feature = "batch")]
pub mod batch;

pub use check::{check, install_trap, trap_sprung, CheckError};
pub use descriptor::combinators::{
    args, args_varargs, dict, list, maybe, optional, shape, tuple, union,
};
pub use descriptor::primitive::{
    any, array, boolean, define, function, mixed, number, object, string, void_,
};
pub use descriptor::{Descriptor, Type};
pub use dispatch::{validate, Mode};
pub use error::{Failure, Failures};
pub use path::{Context, Segment};
pub use registry::{RegistryError, TypeRegistry};
pub use value::{Class, FunctionValue, Instance, RegexValue, Value};

/// Type alias for validation results: success carries nothing, failure
/// carries a non-empty report borrowing the offending value.
pub type ValidationResult<'v> = stillwater::Validation<(), Failures<'v>>;

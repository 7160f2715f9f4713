//! The assertion gate.
//!
//! [`check`] is the strict counterpart of [`crate::validate`]: it validates
//! in collect mode and turns a failing result into a [`CheckError`] carrying
//! the newline-joined failure report. On success the value passes through
//! unchanged, so the call can sit inline at assignment sites.
//!
//! A process-wide diagnostic trap can be installed with [`install_trap`];
//! it is invoked at most once per process lifetime, on the first failing
//! check. Subsequent failures still return errors but do not re-trigger the
//! trap.

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use stillwater::Validation;

use crate::descriptor::Descriptor;
use crate::dispatch::{self, Mode};
use crate::error::Failures;
use crate::path::Context;
use crate::value::Value;

type TrapHook = Box<dyn Fn(&CheckError) + Send + Sync>;

static TRAP_HOOK: Lazy<RwLock<Option<TrapHook>>> = Lazy::new(|| RwLock::new(None));
static TRAP_SPRUNG: AtomicBool = AtomicBool::new(false);

/// The error raised by a failing [`check`].
///
/// Its display form is the string forms of the underlying failures, joined
/// by newlines.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CheckError {
    message: String,
    count: usize,
}

impl CheckError {
    fn from_failures(failures: &Failures<'_>) -> Self {
        Self {
            message: failures.to_string(),
            count: failures.len(),
        }
    }

    /// The newline-joined failure report.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The number of underlying failures.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Validates `value` against `expected` and returns the value unchanged on
/// success.
///
/// Validation runs with an empty context in collect mode, so the error
/// reports every mismatch, not just the first.
///
/// # Errors
///
/// Returns a [`CheckError`] when validation fails.
///
/// # Example
///
/// ```rust
/// use typegate::{check, string, Value};
///
/// let v = Value::from("hello");
/// assert_eq!(check(&v, string()).unwrap(), &v);
///
/// let err = check(&Value::from(1i64), string()).unwrap_err();
/// assert_eq!(err.message(), "Expected an instance of string got 1, (no context)");
/// ```
pub fn check<'v, D>(value: &'v Value, expected: D) -> Result<&'v Value, CheckError>
where
    D: Into<Descriptor>,
{
    match dispatch::validate(value, expected, &Context::root(), Mode::Collect) {
        Validation::Success(()) => Ok(value),
        Validation::Failure(failures) => {
            let error = CheckError::from_failures(&failures);
            spring_trap(&error);
            Err(error)
        }
    }
}

/// Installs the process-wide diagnostic trap.
///
/// The hook runs at most once per process, on the first failing [`check`].
/// Installing a hook after the trap has sprung has no further effect.
pub fn install_trap(hook: impl Fn(&CheckError) + Send + Sync + 'static) {
    *TRAP_HOOK.write() = Some(Box::new(hook));
}

/// Returns true once a failing check has sprung the trap.
pub fn trap_sprung() -> bool {
    TRAP_SPRUNG.load(Ordering::SeqCst)
}

fn spring_trap(error: &CheckError) {
    if TRAP_SPRUNG.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Some(hook) = TRAP_HOOK.read().as_ref() {
        hook(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_error_reports_count_and_message() {
        let failures = {
            let a = Value::from(true);
            Failures::single(crate::error::Failure::new(
                &a,
                crate::descriptor::primitive::string(),
                Context::root(),
            ))
            .into_owned()
        };
        let error = CheckError::from_failures(&failures);
        assert_eq!(error.count(), 1);
        assert_eq!(
            error.message(),
            "Expected an instance of string got true, (no context)"
        );
        assert_eq!(error.to_string(), error.message());
    }
}

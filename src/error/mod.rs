//! Failure reporting for validation.

mod failure;

pub use failure::{Failure, Failures};

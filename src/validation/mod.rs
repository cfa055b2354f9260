//! Concurrent business-rule validation with error accumulation
//!
//! This module provides:
//! - [`ErrorMessage`], one broken rule bound to a target
//! - [`ErrorMessageContainer`], the thread-safe accumulator shared by one run
//! - the [`Validator`] capability and [`from_fn`] for closure-based rules
//! - [`ValidationRunner`] and [`validate`], which run every validator and
//!   report all collected errors at once
//! - [`ValidationError`], separating rule failures from defects and bad calls

pub mod container;
pub mod failure;
pub mod message;
pub mod runner;
pub mod validator;

#[cfg(feature = "serde")]
pub mod config;

pub use container::ErrorMessageContainer;
pub use failure::{Defect, ValidationError, ValidationFailure, DEFAULT_SUMMARY};
pub use message::ErrorMessage;
pub use runner::{validate, validate_checked, ValidationRunner};
pub use validator::{from_fn, FnValidator, Validator};

#[cfg(feature = "serde")]
pub use config::RunnerConfig;

//! Testing utilities for code built on validation runs
//!
//! This module provides a mock validator that records how it was called, and
//! assertion macros for the outcome of a run.
//!
//! # Examples
//!
//! ## RecordingValidator
//!
//! ```rust
//! use rulebook::testing::RecordingValidator;
//! use rulebook::{validate, Validator};
//!
//! # tokio_test::block_on(async {
//! let ok = RecordingValidator::<&str, &str, &str>::passing();
//! let ko = RecordingValidator::<&str, _, _>::recording("foo", "bar");
//! let validators: [&dyn Validator<&str, &str, &str>; 2] = [&ok, &ko];
//!
//! let result = validate(&"hello", validators).await;
//!
//! assert!(result.is_err());
//! assert_eq!(ok.calls(), 1);
//! assert_eq!(ok.seen(), vec!["hello"]);
//! # });
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use rulebook::testing::RecordingValidator;
//! use rulebook::{assert_validation_messages, assert_validation_passed, validate, ErrorMessage};
//!
//! # tokio_test::block_on(async {
//! let ok = RecordingValidator::<i32, &str, &str>::passing();
//! assert_validation_passed!(validate(&1, [&ok]).await);
//!
//! let ko = RecordingValidator::<i32, _, _>::recording("n", "too small");
//! assert_validation_messages!(validate(&1, [&ko]).await, vec![ErrorMessage::new("n", "too small")]);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;

use crate::validation::{Defect, ErrorMessage, ErrorMessageContainer, Validator};

#[derive(Debug, Clone)]
enum Behavior<K, V> {
    Pass,
    Record(Vec<ErrorMessage<K, V>>),
    Fail(String),
    Panic(String),
}

/// A validator that counts its invocations and remembers every element it saw.
///
/// Its behavior is fixed at construction: pass, record messages, fail with a
/// [`Defect`], or panic. It can also wait before acting, to exercise
/// concurrency and timeouts.
#[derive(Debug)]
pub struct RecordingValidator<T, K, V> {
    behavior: Behavior<K, V>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<T>>,
}

impl<T, K, V> RecordingValidator<T, K, V> {
    fn with_behavior(behavior: Behavior<K, V>) -> Self {
        Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A validator that never records anything.
    pub fn passing() -> Self {
        Self::with_behavior(Behavior::Pass)
    }

    /// A validator that records one message on every call.
    pub fn recording(target: K, message: V) -> Self {
        Self::with_behavior(Behavior::Record(vec![ErrorMessage::new(target, message)]))
    }

    /// A validator that records all of `messages` on every call.
    pub fn recording_all(messages: impl IntoIterator<Item = ErrorMessage<K, V>>) -> Self {
        Self::with_behavior(Behavior::Record(messages.into_iter().collect()))
    }

    /// A validator that fails with a [`Defect`] carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// A validator that panics with `message`.
    pub fn panicking(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Panic(message.into()))
    }

    /// Sleep for `delay` before acting.
    #[cfg(feature = "async")]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times the validator was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T: Clone, K, V> RecordingValidator<T, K, V> {
    /// Every element the validator was invoked with, in call order.
    pub fn seen(&self) -> Vec<T> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T, K, V> Validator<T, K, V> for RecordingValidator<T, K, V>
where
    T: Clone + Send + Sync,
    K: Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(element.clone());

            pause(self.delay).await;

            match &self.behavior {
                Behavior::Pass => Ok(()),
                Behavior::Record(messages) => {
                    for msg in messages {
                        errors.add_error(msg.clone())?;
                    }
                    Ok(())
                }
                Behavior::Fail(message) => Err(Defect::msg(message)),
                Behavior::Panic(message) => panic!("{}", message),
            }
        })
    }
}

#[cfg(feature = "async")]
async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(not(feature = "async"))]
async fn pause(_: Option<Duration>) {}

/// Assert that a validation run passed.
///
/// This macro will panic if the run returned an error.
///
/// # Example
///
/// ```rust
/// use rulebook::{assert_validation_passed, ValidationError};
///
/// let result: Result<(), ValidationError<String, String>> = Ok(());
/// assert_validation_passed!(result);
/// ```
#[macro_export]
macro_rules! assert_validation_passed {
    ($result:expr) => {
        match $result {
            Ok(()) => {}
            Err(e) => {
                panic!("Expected validation to pass, got: {:?}", e);
            }
        }
    };
}

/// Assert that a validation run failed on broken rules, returning the
/// [`ValidationFailure`](crate::ValidationFailure).
///
/// This macro will panic on success, on a defect, or on any other error.
///
/// # Example
///
/// ```rust
/// use rulebook::{assert_validation_failed, ErrorMessageContainer, ValidationError, ValidationFailure};
///
/// let errors = ErrorMessageContainer::new();
/// errors.push("name", "required");
/// let result: Result<(), ValidationError<_, _>> =
///     Err(ValidationFailure::from_container(errors).unwrap().into());
///
/// let failure = assert_validation_failed!(result);
/// assert_eq!(failure.len(), 1);
/// ```
#[macro_export]
macro_rules! assert_validation_failed {
    ($result:expr) => {
        match $result {
            Err($crate::ValidationError::Failed(failure)) => failure,
            Ok(()) => panic!("Expected validation failure, got success"),
            Err(other) => panic!("Expected validation failure, got: {:?}", other),
        }
    };
}

/// Assert that a validation run failed with exactly the expected messages.
///
/// # Example
///
/// ```rust
/// use rulebook::{assert_validation_messages, ErrorMessage, ErrorMessageContainer, ValidationError, ValidationFailure};
///
/// let errors = ErrorMessageContainer::new();
/// errors.push("a", 1);
/// errors.push("b", 2);
/// let result: Result<(), ValidationError<_, _>> =
///     Err(ValidationFailure::from_container(errors).unwrap().into());
///
/// assert_validation_messages!(result, vec![ErrorMessage::new("a", 1), ErrorMessage::new("b", 2)]);
/// ```
#[macro_export]
macro_rules! assert_validation_messages {
    ($result:expr, $expected:expr) => {{
        let failure = $crate::assert_validation_failed!($result);
        assert_eq!(failure.messages(), $expected);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate, ValidationError, ValidationFailure};

    #[tokio::test]
    async fn recording_validator_counts_calls() {
        let validator = RecordingValidator::<u8, &str, &str>::passing();
        let errors = ErrorMessageContainer::new();

        validator.validate(&1, &errors).await.unwrap();
        validator.validate(&2, &errors).await.unwrap();

        assert_eq!(validator.calls(), 2);
        assert_eq!(validator.seen(), vec![1, 2]);
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn recording_validator_records_every_message() {
        let validator = RecordingValidator::<u8, _, _>::recording_all([
            ErrorMessage::new("a", "x"),
            ErrorMessage::new("b", "y"),
        ]);
        let errors = ErrorMessageContainer::new();

        validator.validate(&1, &errors).await.unwrap();

        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn failing_validator_returns_defect() {
        let validator = RecordingValidator::<u8, &str, &str>::failing("db down");
        let errors = ErrorMessageContainer::new();

        let defect = validator.validate(&1, &errors).await.unwrap_err();

        assert_eq!(defect.inner().to_string(), "db down");
        assert_eq!(validator.calls(), 1);
    }

    #[tokio::test]
    async fn assert_validation_passed_macro() {
        let ok = RecordingValidator::<u8, &str, &str>::passing();
        assert_validation_passed!(validate(&1, [&ok]).await);
    }

    #[tokio::test]
    async fn assert_validation_failed_macro_returns_failure() {
        let ko = RecordingValidator::<u8, _, _>::recording("k", "v");
        let failure = assert_validation_failed!(validate(&1, [&ko]).await);
        assert_eq!(failure.messages(), vec![ErrorMessage::new("k", "v")]);
    }

    #[test]
    #[should_panic(expected = "Expected validation to pass")]
    fn assert_validation_passed_panics_on_failure() {
        let errors = ErrorMessageContainer::new();
        errors.push("k", "v");
        let result: Result<(), ValidationError<_, _>> =
            Err(ValidationFailure::from_container(errors).unwrap().into());
        assert_validation_passed!(result);
    }

    #[test]
    #[should_panic(expected = "Expected validation failure, got success")]
    fn assert_validation_failed_panics_on_success() {
        let result: Result<(), ValidationError<u8, u8>> = Ok(());
        let _ = assert_validation_failed!(result);
    }

    #[test]
    #[should_panic(expected = "Expected validation failure, got")]
    fn assert_validation_failed_panics_on_defect() {
        let result: Result<(), ValidationError<u8, u8>> = Err(Defect::msg("boom").into());
        let _ = assert_validation_failed!(result);
    }

    #[test]
    #[should_panic]
    fn assert_validation_messages_panics_on_mismatch() {
        let errors = ErrorMessageContainer::new();
        errors.push("k", "v");
        let result: Result<(), ValidationError<_, _>> =
            Err(ValidationFailure::from_container(errors).unwrap().into());
        assert_validation_messages!(result, vec![ErrorMessage::new("k", "other")]);
    }
}

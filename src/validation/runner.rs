//! Running a set of validators against one element
//!
//! [`ValidationRunner::run`] fans out one evaluation per validator, waits for
//! every one of them, then inspects the shared container:
//!
//! - a validator returned an error or panicked: [`ValidationError::Defect`]
//!   (the defect of the lowest position wins, the recorded messages are dropped);
//! - messages were recorded: [`ValidationError::Failed`];
//! - otherwise `Ok(())`.
//!
//! Validators are never short-circuited: a recorded error does not stop the
//! others from running. An empty validator collection passes.
//!
//! # Examples
//!
//! ```
//! use rulebook::{from_fn, ErrorMessage, ErrorMessageContainer, ValidationRunner, Validator};
//!
//! # tokio_test::block_on(async {
//! let positive = from_fn(|n: &i64, errors: &ErrorMessageContainer<&str, &str>| {
//!     errors.add_error_unless(*n > 0, || ErrorMessage::new("n", "must be positive"))?;
//!     Ok(())
//! });
//! let even = from_fn(|n: &i64, errors: &ErrorMessageContainer<&str, &str>| {
//!     errors.add_error_unless(n % 2 == 0, || ErrorMessage::new("n", "must be even"))?;
//!     Ok(())
//! });
//! let rules: [&dyn Validator<i64, &str, &str>; 2] = [&positive, &even];
//!
//! let runner = ValidationRunner::new().with_summary("invalid number");
//! assert!(runner.run(&4, rules).await.is_ok());
//!
//! let err = runner.run(&-3, rules).await.unwrap_err();
//! let failure = err.failure().unwrap();
//! assert_eq!(failure.summary(), "invalid number");
//! assert_eq!(failure.len(), 2);
//! # });
//! ```

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::ops::Deref;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tracing::Instrument;

use super::container::ErrorMessageContainer;
use super::failure::{Defect, ValidationError, ValidationFailure, DEFAULT_SUMMARY};
use super::validator::Validator;
use crate::error::{require, InvalidArgument};

/// Runs validators concurrently and turns their findings into one outcome.
///
/// A runner is plain configuration: cheap to clone, reusable across runs, and
/// holding no state between them.
///
/// # Examples
///
/// ```
/// use rulebook::ValidationRunner;
/// use std::time::Duration;
///
/// let runner = ValidationRunner::new()
///     .with_concurrency_limit(4)
///     .with_timeout(Duration::from_secs(2))
///     .with_summary("order rejected");
///
/// assert_eq!(runner.concurrency_limit(), Some(4));
/// assert_eq!(runner.timeout(), Some(Duration::from_secs(2)));
/// assert_eq!(runner.summary(), "order rejected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRunner {
    timeout: Option<Duration>,
    concurrency_limit: Option<NonZeroUsize>,
    summary: Cow<'static, str>,
}

impl ValidationRunner {
    /// A runner with no timeout, no concurrency limit and the default summary.
    pub fn new() -> Self {
        Self {
            timeout: None,
            concurrency_limit: None,
            summary: Cow::Borrowed(DEFAULT_SUMMARY),
        }
    }

    /// Bound the whole run by `duration`.
    ///
    /// When the bound is exceeded the pending evaluations are dropped and the
    /// run ends with [`ValidationError::TimedOut`].
    #[cfg(feature = "async")]
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Poll at most `limit` evaluations at once. A limit of zero is raised to one.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(NonZeroUsize::new(limit).unwrap_or(NonZeroUsize::MIN));
        self
    }

    /// Like [`with_concurrency_limit`](Self::with_concurrency_limit), rejecting zero.
    pub fn try_with_concurrency_limit(self, limit: usize) -> Result<Self, InvalidArgument> {
        if limit == 0 {
            return Err(InvalidArgument::new(
                "concurrency_limit",
                "must be greater than zero",
            ));
        }
        Ok(self.with_concurrency_limit(limit))
    }

    /// Summary attached to the [`ValidationFailure`] of a failed run.
    pub fn with_summary(mut self, summary: impl Into<Cow<'static, str>>) -> Self {
        self.summary = summary.into();
        self
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The configured concurrency limit.
    pub fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency_limit.map(NonZeroUsize::get)
    }

    /// The summary of failed runs.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Validate `element` against every validator.
    ///
    /// Each validator is invoked exactly once with `element` and a container
    /// created for this run. See the [module documentation](self) for how the
    /// outcome is decided.
    pub async fn run<T, K, V, I, P>(
        &self,
        element: &T,
        validators: I,
    ) -> Result<(), ValidationError<K, V>>
    where
        T: ?Sized,
        I: IntoIterator,
        I::Item: Deref<Target = P>,
        P: Validator<T, K, V> + ?Sized,
    {
        let validators: Vec<I::Item> = validators.into_iter().collect();
        let span = tracing::debug_span!("validation_run", validators = validators.len());
        self.run_collected(element, &validators)
            .instrument(span)
            .await
    }

    /// Like [`run`](Self::run), for arguments that may be absent.
    ///
    /// An absent element or validator collection fails with
    /// [`ValidationError::InvalidArgument`] before any validator is invoked.
    /// The element is checked first.
    pub async fn run_checked<T, K, V, I, P>(
        &self,
        element: Option<&T>,
        validators: Option<I>,
    ) -> Result<(), ValidationError<K, V>>
    where
        T: ?Sized,
        I: IntoIterator,
        I::Item: Deref<Target = P>,
        P: Validator<T, K, V> + ?Sized,
    {
        let element = require(element, "element")?;
        let validators = require(validators, "validators")?;
        self.run(element, validators).await
    }

    async fn run_collected<T, K, V, D, P>(
        &self,
        element: &T,
        validators: &[D],
    ) -> Result<(), ValidationError<K, V>>
    where
        T: ?Sized,
        D: Deref<Target = P>,
        P: Validator<T, K, V> + ?Sized,
    {
        tracing::debug!("starting validation run");
        let errors = ErrorMessageContainer::new();

        let outcomes = {
            let evaluations = validators
                .iter()
                .enumerate()
                .map(|(index, validator)| evaluate(index, &**validator, element, &errors));
            let fan_in = async {
                match self.concurrency_limit {
                    None => join_all(evaluations).await,
                    Some(limit) => {
                        stream::iter(evaluations)
                            .buffer_unordered(limit.get())
                            .collect()
                            .await
                    }
                }
            };
            self.bounded::<_, K, V>(fan_in).await?
        };

        let defect = outcomes
            .into_iter()
            .filter_map(Result::err)
            .inspect(|defect| tracing::warn!(%defect, "validator failed unexpectedly"))
            .min_by_key(Defect::validator_index);
        if let Some(defect) = defect {
            return Err(ValidationError::Defect(defect));
        }

        if !errors.has_errors() {
            tracing::debug!("validation passed");
            return Ok(());
        }

        let failure = ValidationFailure::new(self.summary.clone(), errors)?;
        tracing::debug!(errors = failure.len(), "validation failed");
        Err(ValidationError::Failed(failure))
    }

    #[cfg(feature = "async")]
    async fn bounded<F, K, V>(&self, fan_in: F) -> Result<F::Output, ValidationError<K, V>>
    where
        F: std::future::Future,
    {
        let Some(duration) = self.timeout else {
            return Ok(fan_in.await);
        };
        tokio::time::timeout(duration, fan_in).await.map_err(|_| {
            tracing::warn!(?duration, "validation run timed out");
            ValidationError::TimedOut { duration }
        })
    }

    #[cfg(not(feature = "async"))]
    async fn bounded<F, K, V>(&self, fan_in: F) -> Result<F::Output, ValidationError<K, V>>
    where
        F: std::future::Future,
    {
        Ok(fan_in.await)
    }
}

impl Default for ValidationRunner {
    fn default() -> Self {
        Self::new()
    }
}

// Panics raised while building or polling the validator's future become defects.
async fn evaluate<T, K, V, P>(
    index: usize,
    validator: &P,
    element: &T,
    errors: &ErrorMessageContainer<K, V>,
) -> Result<(), Defect>
where
    T: ?Sized,
    P: Validator<T, K, V> + ?Sized,
{
    let outcome = AssertUnwindSafe(async move { validator.validate(element, errors).await })
        .catch_unwind()
        .await;
    match outcome {
        Ok(result) => result.map_err(|defect| defect.at(index)),
        Err(payload) => Err(Defect::from_panic(payload).at(index)),
    }
}

/// Validate `element` with a default [`ValidationRunner`].
///
/// # Examples
///
/// ```
/// use rulebook::{from_fn, validate, ErrorMessage, ErrorMessageContainer, ValidationError};
///
/// # tokio_test::block_on(async {
/// let rule = from_fn(|s: &str, errors: &ErrorMessageContainer<&str, &str>| {
///     if s.trim().is_empty() {
///         errors.push("title", "is blank");
///     }
///     Ok(())
/// });
///
/// match validate("   ", [&rule]).await {
///     Err(ValidationError::Failed(failure)) => {
///         assert_eq!(failure.messages(), vec![ErrorMessage::new("title", "is blank")]);
///     }
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// # });
/// ```
pub async fn validate<T, K, V, I, P>(element: &T, validators: I) -> Result<(), ValidationError<K, V>>
where
    T: ?Sized,
    I: IntoIterator,
    I::Item: Deref<Target = P>,
    P: Validator<T, K, V> + ?Sized,
{
    ValidationRunner::new().run(element, validators).await
}

/// Validate with a default [`ValidationRunner`], for arguments that may be absent.
///
/// # Examples
///
/// ```
/// use rulebook::{validate_checked, Validator};
///
/// # tokio_test::block_on(async {
/// let none: Option<Vec<Box<dyn Validator<str, String, String>>>> = None;
/// let err = validate_checked(Some("hello"), none).await.unwrap_err();
/// assert!(err.is_invalid_argument());
/// # });
/// ```
pub async fn validate_checked<T, K, V, I, P>(
    element: Option<&T>,
    validators: Option<I>,
) -> Result<(), ValidationError<K, V>>
where
    T: ?Sized,
    I: IntoIterator,
    I::Item: Deref<Target = P>,
    P: Validator<T, K, V> + ?Sized,
{
    ValidationRunner::new().run_checked(element, validators).await
}

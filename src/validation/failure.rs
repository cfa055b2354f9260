//! Outcomes of a validation run other than success
//!
//! A run ends in exactly one of three ways besides `Ok(())`, and
//! [`ValidationError`] keeps them apart:
//!
//! - [`ValidationError::InvalidArgument`]: the call itself was malformed.
//! - [`ValidationError::Failed`]: one or more rules were broken; the
//!   [`ValidationFailure`] carries every recorded message.
//! - [`ValidationError::Defect`]: a validator failed unexpectedly (returned an
//!   error or panicked). No messages are reported in that case.
//!
//! A run bounded by a timeout can also end in [`ValidationError::TimedOut`].

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::container::ErrorMessageContainer;
use super::message::ErrorMessage;
use crate::error::InvalidArgument;

/// Summary used when a run fails and no other summary was configured.
pub const DEFAULT_SUMMARY: &str = "validation failed";

/// The set of broken rules collected during one validation run.
///
/// Always holds at least one message.
///
/// # Examples
///
/// ```
/// use rulebook::{ErrorMessage, ErrorMessageContainer, ValidationFailure};
///
/// let errors = ErrorMessageContainer::new();
/// errors.push("email", "required");
///
/// let failure = ValidationFailure::from_container(errors).unwrap();
/// assert_eq!(failure.summary(), "validation failed");
/// assert_eq!(failure.messages(), vec![ErrorMessage::new("email", "required")]);
/// assert_eq!(failure.to_string(), "validation failed: 1 error(s)");
/// ```
pub struct ValidationFailure<K, V> {
    summary: String,
    container: ErrorMessageContainer<K, V>,
}

impl<K, V> ValidationFailure<K, V> {
    /// Wrap `container` with a human readable summary.
    ///
    /// Fails with [`InvalidArgument`] if the container holds no message.
    pub fn new(
        summary: impl Into<String>,
        container: ErrorMessageContainer<K, V>,
    ) -> Result<Self, InvalidArgument> {
        if container.is_empty() {
            return Err(InvalidArgument::new(
                "container",
                "a validation failure needs at least one error message",
            ));
        }
        Ok(Self {
            summary: summary.into(),
            container,
        })
    }

    /// Wrap `container` with [`DEFAULT_SUMMARY`], or return `None` if it is empty.
    pub fn from_container(container: ErrorMessageContainer<K, V>) -> Option<Self> {
        Self::new(DEFAULT_SUMMARY, container).ok()
    }

    /// The summary message.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The container the messages were collected in.
    pub fn container(&self) -> &ErrorMessageContainer<K, V> {
        &self.container
    }

    /// Number of collected messages.
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Always `false`; present for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Take the collected messages.
    pub fn into_messages(self) -> Vec<ErrorMessage<K, V>> {
        self.container.into_messages()
    }
}

impl<K: Clone, V: Clone> ValidationFailure<K, V> {
    /// Every collected message, in the order it was recorded.
    pub fn messages(&self) -> Vec<ErrorMessage<K, V>> {
        self.container.messages()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ValidationFailure<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("summary", &self.summary)
            .field("container", &self.container)
            .finish()
    }
}

impl<K, V> fmt::Display for ValidationFailure<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} error(s)", self.summary, self.len())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> StdError for ValidationFailure<K, V> {}

/// An unexpected failure inside a validator.
///
/// Defects are not rule violations: they mean the validator itself could not do
/// its job (a lookup failed, an invariant broke, the code panicked). They are
/// never merged into a [`ValidationFailure`].
///
/// # Examples
///
/// ```
/// use rulebook::Defect;
///
/// let defect = Defect::msg("user service unreachable");
/// assert_eq!(defect.to_string(), "validator defect: user service unreachable");
/// assert!(!defect.is_panic());
/// ```
#[derive(Debug)]
pub struct Defect {
    source: Box<dyn StdError + Send + Sync>,
    validator_index: Option<usize>,
    panicked: bool,
}

impl Defect {
    /// Wrap an error raised by a validator.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self {
            source: error.into(),
            validator_index: None,
            panicked: false,
        }
    }

    /// Create a defect from a plain message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(message.to_string())
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "validator panicked".to_string()
        };
        Self {
            panicked: true,
            ..Self::new(message)
        }
    }

    pub(crate) fn at(mut self, index: usize) -> Self {
        self.validator_index = Some(index);
        self
    }

    /// Position of the failing validator in the collection passed to the run.
    pub fn validator_index(&self) -> Option<usize> {
        self.validator_index
    }

    /// Whether the validator panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        self.panicked
    }

    /// The underlying error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Take the underlying error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.source
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.panicked {
            write!(f, "validator panicked: {}", self.source)?;
        } else {
            write!(f, "validator defect: {}", self.source)?;
        }
        if let Some(index) = self.validator_index {
            write!(f, " (validator #{})", index)?;
        }
        Ok(())
    }
}

impl StdError for Defect {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Everything a validation run can fail with.
///
/// # Examples
///
/// ```
/// use rulebook::{ErrorMessage, ErrorMessageContainer, ValidationError, ValidationFailure};
///
/// let errors = ErrorMessageContainer::new();
/// errors.push("name", "required");
/// let err: ValidationError<&str, &str> =
///     ValidationFailure::from_container(errors).unwrap().into();
///
/// match err {
///     ValidationError::Failed(failure) => {
///         assert_eq!(failure.messages(), vec![ErrorMessage::new("name", "required")]);
///     }
///     other => panic!("unexpected outcome: {}", other),
/// }
/// ```
#[derive(Debug)]
pub enum ValidationError<K, V> {
    /// The element or the validator collection was absent.
    InvalidArgument(InvalidArgument),
    /// At least one rule was broken.
    Failed(ValidationFailure<K, V>),
    /// A validator failed unexpectedly.
    Defect(Defect),
    /// The run did not finish within its configured timeout.
    TimedOut {
        /// The timeout that was exceeded.
        duration: Duration,
    },
}

impl<K, V> ValidationError<K, V> {
    /// Returns true for [`ValidationError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns true for [`ValidationError::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true for [`ValidationError::Defect`].
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect(_))
    }

    /// Returns true for [`ValidationError::TimedOut`].
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// The failure, if rules were broken.
    pub fn failure(&self) -> Option<&ValidationFailure<K, V>> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Take the failure, if rules were broken.
    pub fn into_failure(self) -> Option<ValidationFailure<K, V>> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The defect, if a validator failed unexpectedly.
    pub fn defect(&self) -> Option<&Defect> {
        match self {
            Self::Defect(defect) => Some(defect),
            _ => None,
        }
    }
}

impl<K, V> fmt::Display for ValidationError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => write!(f, "{}", e),
            Self::Failed(failure) => write!(f, "{}", failure),
            Self::Defect(defect) => write!(f, "{}", defect),
            Self::TimedOut { duration } => {
                write!(f, "validation did not complete within {:?}", duration)
            }
        }
    }
}

impl<K, V> StdError for ValidationError<K, V>
where
    K: fmt::Debug + 'static,
    V: fmt::Debug + 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::Failed(failure) => Some(failure),
            Self::Defect(defect) => Some(defect),
            Self::TimedOut { .. } => None,
        }
    }
}

// A validator passing an absent value to the container is a bug in that validator.
impl From<InvalidArgument> for Defect {
    fn from(error: InvalidArgument) -> Self {
        Self::new(error)
    }
}

impl<K, V> From<InvalidArgument> for ValidationError<K, V> {
    fn from(error: InvalidArgument) -> Self {
        Self::InvalidArgument(error)
    }
}

impl<K, V> From<ValidationFailure<K, V>> for ValidationError<K, V> {
    fn from(failure: ValidationFailure<K, V>) -> Self {
        Self::Failed(failure)
    }
}

impl<K, V> From<Defect> for ValidationError<K, V> {
    fn from(defect: Defect) -> Self {
        Self::Defect(defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_rejects_empty_container() {
        let err = ValidationFailure::<&str, &str>::new("nope", ErrorMessageContainer::new())
            .unwrap_err();
        assert_eq!(err.argument(), "container");
        assert!(ValidationFailure::<u8, u8>::from_container(ErrorMessageContainer::new()).is_none());
    }

    #[test]
    fn test_failure_keeps_all_messages() {
        let errors = ErrorMessageContainer::new();
        errors.push("a", 1);
        errors.push("b", 2);

        let failure = ValidationFailure::new("bad input", errors).unwrap();
        assert_eq!(failure.summary(), "bad input");
        assert_eq!(failure.len(), 2);
        assert!(!failure.is_empty());
        assert_eq!(
            failure.into_messages(),
            vec![ErrorMessage::new("a", 1), ErrorMessage::new("b", 2)]
        );
    }

    #[test]
    fn test_defect_from_panic_payloads() {
        let defect = Defect::from_panic(Box::new("static str"));
        assert!(defect.is_panic());
        assert_eq!(defect.to_string(), "validator panicked: static str");

        let defect = Defect::from_panic(Box::new(String::from("owned")));
        assert_eq!(defect.inner().to_string(), "owned");

        let defect = Defect::from_panic(Box::new(42_u32));
        assert_eq!(defect.inner().to_string(), "validator panicked");
    }

    #[test]
    fn test_defect_index_is_displayed() {
        let defect = Defect::msg("db down").at(3);
        assert_eq!(defect.validator_index(), Some(3));
        assert_eq!(defect.to_string(), "validator defect: db down (validator #3)");
    }

    #[test]
    fn test_defect_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let defect = Defect::new(io);
        assert_eq!(defect.source().map(|s| s.to_string()), Some("disk".into()));
        assert_eq!(defect.into_inner().to_string(), "disk");
    }

    #[test]
    fn test_invalid_argument_becomes_defect() {
        let defect: Defect = InvalidArgument::absent("msg").into();
        assert!(!defect.is_panic());
        assert_eq!(
            defect.to_string(),
            "validator defect: invalid argument `msg`: value is absent"
        );
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let invalid: ValidationError<u8, u8> = InvalidArgument::absent("element").into();
        assert!(invalid.is_invalid_argument());
        assert!(invalid.failure().is_none());

        let defect: ValidationError<u8, u8> = Defect::msg("x").into();
        assert!(defect.is_defect());
        assert!(defect.defect().is_some());

        let timed_out: ValidationError<u8, u8> = ValidationError::TimedOut {
            duration: Duration::from_millis(5),
        };
        assert!(timed_out.is_timed_out());
        assert!(timed_out.source().is_none());
        assert_eq!(
            timed_out.to_string(),
            "validation did not complete within 5ms"
        );

        let errors = ErrorMessageContainer::new();
        errors.push(1_u8, 2_u8);
        let failed: ValidationError<u8, u8> =
            ValidationFailure::from_container(errors).unwrap().into();
        assert!(failed.is_failed());
        assert_eq!(failed.into_failure().map(|f| f.len()), Some(1));
    }
}

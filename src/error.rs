//! Invalid-argument errors
//!
//! Every operation in this crate that rejects a caller-supplied value does so
//! synchronously with an [`InvalidArgument`]. These errors signal a mistake at
//! the call site and are never caught inside the crate.

use std::borrow::Cow;

/// A required argument was absent or out of its accepted range.
///
/// # Examples
///
/// ```
/// use rulebook::InvalidArgument;
///
/// let err = InvalidArgument::absent("element");
/// assert_eq!(err.argument(), "element");
/// assert_eq!(err.to_string(), "invalid argument `element`: value is absent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument `{argument}`: {reason}")]
pub struct InvalidArgument {
    argument: &'static str,
    reason: Cow<'static, str>,
}

impl InvalidArgument {
    /// Create an error for `argument` with a free-form reason.
    pub fn new(argument: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            argument,
            reason: reason.into(),
        }
    }

    /// Create an error for a required value that was not supplied.
    pub fn absent(argument: &'static str) -> Self {
        Self::new(argument, "value is absent")
    }

    /// Name of the offending argument.
    pub fn argument(&self) -> &'static str {
        self.argument
    }

    /// Why the argument was rejected.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Unwrap a required `Option`, reporting `argument` when it is `None`.
pub(crate) fn require<T>(value: Option<T>, argument: &'static str) -> Result<T, InvalidArgument> {
    value.ok_or_else(|| InvalidArgument::absent(argument))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_message() {
        let err = InvalidArgument::absent("msg");
        assert_eq!(err.argument(), "msg");
        assert_eq!(err.reason(), "value is absent");
    }

    #[test]
    fn test_custom_reason_is_displayed() {
        let err = InvalidArgument::new("chunk_size", format!("must be positive, got {}", 0));
        assert_eq!(
            err.to_string(),
            "invalid argument `chunk_size`: must be positive, got 0"
        );
    }

    #[test]
    fn test_require() {
        assert_eq!(require(Some(3), "x"), Ok(3));
        assert_eq!(
            require::<i32>(None, "x"),
            Err(InvalidArgument::absent("x"))
        );
    }
}

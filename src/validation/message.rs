//! Error messages reported by validators

use std::fmt;

use crate::error::{require, InvalidArgument};

/// A single failed rule: the target it concerns and what to tell the user.
///
/// `K` identifies where the error belongs (a form field key, a JSON pointer,
/// an enum of UI widgets...) and `V` is the message payload. Equality and
/// hashing are structural over both fields.
///
/// # Examples
///
/// ```
/// use rulebook::ErrorMessage;
///
/// let msg = ErrorMessage::new("email", "must contain @");
/// assert_eq!(msg.target(), &"email");
/// assert_eq!(msg.message(), &"must contain @");
/// assert_eq!(msg, ErrorMessage::new("email", "must contain @"));
/// assert_ne!(msg, ErrorMessage::new("email", "is required"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMessage<K, V> {
    target: K,
    message: V,
}

impl<K, V> ErrorMessage<K, V> {
    /// Create a message bound to `target`.
    #[inline]
    pub fn new(target: K, message: V) -> Self {
        Self { target, message }
    }

    /// Create a message from values that may be absent.
    ///
    /// Fails with [`InvalidArgument`] naming the first absent field.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulebook::ErrorMessage;
    ///
    /// assert!(ErrorMessage::try_new(Some("name"), Some("too short")).is_ok());
    ///
    /// let err = ErrorMessage::<&str, &str>::try_new(Some("name"), None).unwrap_err();
    /// assert_eq!(err.argument(), "message");
    /// ```
    pub fn try_new(target: Option<K>, message: Option<V>) -> Result<Self, InvalidArgument> {
        let target = require(target, "target")?;
        let message = require(message, "message")?;
        Ok(Self::new(target, message))
    }

    /// The target this message is bound to.
    #[inline]
    pub fn target(&self) -> &K {
        &self.target
    }

    /// The message payload.
    #[inline]
    pub fn message(&self) -> &V {
        &self.message
    }

    /// Split into `(target, message)`.
    pub fn into_parts(self) -> (K, V) {
        (self.target, self.message)
    }
}

impl<K, V> From<(K, V)> for ErrorMessage<K, V> {
    fn from((target, message): (K, V)) -> Self {
        Self::new(target, message)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for ErrorMessage<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ target: {} - message: {} ]", self.target, self.message)
    }
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<K, V> Arbitrary for ErrorMessage<K, V>
where
    K: Arbitrary + 'static,
    V: Arbitrary + 'static,
{
    type Parameters = (K::Parameters, V::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (k_params, v_params) = args;
        (any_with::<K>(k_params), any_with::<V>(v_params))
            .prop_map(|(target, message)| ErrorMessage::new(target, message))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_is_structural() {
        let a = ErrorMessage::new("a", "b");
        assert_eq!(a, ErrorMessage::new("a", "b"));
        assert_ne!(a, ErrorMessage::new("a", "c"));
        assert_ne!(a, ErrorMessage::new("z", "b"));
    }

    #[test]
    fn test_comparison_with_absent_is_false() {
        let a = ErrorMessage::new("a", "b");
        assert_ne!(Some(&a), None);
    }

    #[test]
    fn test_hash_matches_equality() {
        let set: HashSet<_> = [
            ErrorMessage::new("k", 1),
            ErrorMessage::new("k", 1),
            ErrorMessage::new("k", 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_try_new_rejects_absent_target() {
        let err = ErrorMessage::<String, String>::try_new(None, Some("m".into())).unwrap_err();
        assert_eq!(err.argument(), "target");
    }

    #[test]
    fn test_try_new_rejects_absent_message() {
        let err = ErrorMessage::<String, String>::try_new(Some("t".into()), None).unwrap_err();
        assert_eq!(err.argument(), "message");
    }

    #[test]
    fn test_try_new_checks_target_first() {
        let err = ErrorMessage::<u8, u8>::try_new(None, None).unwrap_err();
        assert_eq!(err.argument(), "target");
    }

    #[test]
    fn test_display() {
        let msg = ErrorMessage::new("hello", "world");
        assert_eq!(msg.to_string(), "[ target: hello - message: world ]");
    }

    #[test]
    fn test_into_parts_and_from_tuple() {
        let msg: ErrorMessage<_, _> = ("field", 42).into();
        assert_eq!(msg.into_parts(), ("field", 42));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let msg = ErrorMessage::new("email".to_string(), "required".to_string());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "target": "email", "message": "required" })
        );
        let back: ErrorMessage<String, String> = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }
}

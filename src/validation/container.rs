//! Shared accumulator for error messages
//!
//! One [`ErrorMessageContainer`] lives for exactly one validation run. Every
//! validator of the run receives a shared reference to it and records its
//! failures through [`ErrorMessageContainer::add_error`] or
//! [`ErrorMessageContainer::add_error_unless`]. Appends and snapshot reads are
//! serialized by a single mutex, so validators polled concurrently (or running
//! on different threads) never lose an entry.
//!
//! # Examples
//!
//! ```
//! use rulebook::{ErrorMessage, ErrorMessageContainer};
//!
//! let errors = ErrorMessageContainer::new();
//! let age = 15;
//!
//! errors.add_error_unless(age >= 18, || ErrorMessage::new("age", "must be an adult"))?;
//! errors.add_error_unless(age > 0, || ErrorMessage::new("age", "must be positive"))?;
//!
//! assert!(errors.has_errors());
//! assert_eq!(errors.messages(), vec![ErrorMessage::new("age", "must be an adult")]);
//! # Ok::<(), rulebook::InvalidArgument>(())
//! ```

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::message::ErrorMessage;
use crate::error::{require, InvalidArgument};

/// Thread-safe, append-only list of [`ErrorMessage`]s.
///
/// The backing sequence is never handed out by reference: readers get an owned
/// snapshot from [`messages`](Self::messages), so the only way to add an entry
/// is through the container's own append methods.
pub struct ErrorMessageContainer<K, V> {
    messages: Mutex<Vec<ErrorMessage<K, V>>>,
}

impl<K, V> ErrorMessageContainer<K, V> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    // A validator that panicked while holding the lock cannot have left the Vec
    // half-written (push is the only mutation), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<ErrorMessage<K, V>>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a message.
    ///
    /// Accepts either an [`ErrorMessage`] or an `Option` of one; `None` is
    /// rejected with [`InvalidArgument`] and the container is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulebook::{ErrorMessage, ErrorMessageContainer};
    ///
    /// let errors = ErrorMessageContainer::new();
    /// errors.add_error(ErrorMessage::new("name", "required")).unwrap();
    /// assert!(errors.add_error(None).is_err());
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn add_error(
        &self,
        msg: impl Into<Option<ErrorMessage<K, V>>>,
    ) -> Result<(), InvalidArgument> {
        let msg = require(msg.into(), "msg")?;
        self.lock().push(msg);
        Ok(())
    }

    /// Append a message built from `target` and `message`.
    pub fn push(&self, target: K, message: V) {
        self.lock().push(ErrorMessage::new(target, message));
    }

    /// Record an error only when `assertion` does not hold.
    ///
    /// `factory` is invoked at most once, and only when `assertion` is `false`,
    /// so it may do work that is only meaningful in the failing branch. A factory
    /// producing `None` is rejected with [`InvalidArgument`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rulebook::{ErrorMessage, ErrorMessageContainer};
    ///
    /// let errors = ErrorMessageContainer::<&str, String>::new();
    /// let name = "";
    ///
    /// errors
    ///     .add_error_unless(!name.is_empty(), || {
    ///         ErrorMessage::new("name", format!("{:?} is empty", name))
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn add_error_unless<F, R>(&self, assertion: bool, factory: F) -> Result<(), InvalidArgument>
    where
        F: FnOnce() -> R,
        R: Into<Option<ErrorMessage<K, V>>>,
    {
        if assertion {
            return Ok(());
        }
        self.add_error(factory())
    }

    /// Like [`add_error_unless`](Self::add_error_unless), for a factory that may be absent.
    ///
    /// An absent factory is rejected whatever the assertion.
    pub fn add_error_unless_checked<F, R>(
        &self,
        assertion: bool,
        factory: Option<F>,
    ) -> Result<(), InvalidArgument>
    where
        F: FnOnce() -> R,
        R: Into<Option<ErrorMessage<K, V>>>,
    {
        let factory = require(factory, "factory")?;
        self.add_error_unless(assertion, factory)
    }

    /// Whether at least one message has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no message has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consume the container, returning the messages in insertion order.
    pub fn into_messages(self) -> Vec<ErrorMessage<K, V>> {
        self.messages
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Clone, V: Clone> ErrorMessageContainer<K, V> {
    /// Snapshot of every message recorded so far, in insertion order.
    ///
    /// The snapshot is taken under the lock and never observes a partial append.
    pub fn messages(&self) -> Vec<ErrorMessage<K, V>> {
        self.lock().clone()
    }
}

// Only one lock is held at a time, so comparing the same pair from two threads
// in opposite order cannot deadlock.
impl<K: Clone + PartialEq, V: Clone + PartialEq> PartialEq for ErrorMessageContainer<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let mine = self.messages();
        *other.lock() == mine
    }
}

impl<K: Clone + Eq, V: Clone + Eq> Eq for ErrorMessageContainer<K, V> {}

impl<K, V> Default for ErrorMessageContainer<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<ErrorMessage<K, V>> for ErrorMessageContainer<K, V> {
    fn from_iter<I: IntoIterator<Item = ErrorMessage<K, V>>>(iter: I) -> Self {
        Self {
            messages: Mutex::new(iter.into_iter().collect()),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ErrorMessageContainer<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorMessageContainer")
            .field("messages", &*self.lock())
            .finish()
    }
}

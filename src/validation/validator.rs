//! The validator capability
//!
//! A [`Validator`] checks one business rule against an element and records any
//! violation in the shared [`ErrorMessageContainer`]. It returns `Err` only for
//! a [`Defect`], never for an ordinary rule violation.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::container::ErrorMessageContainer;
use super::failure::Defect;

/// One independent rule check.
///
/// The returned future may suspend (waiting on a lookup, for instance). Several
/// validators of the same run are polled concurrently, so implementations must
/// not assume anything about the order in which other validators run.
///
/// # Examples
///
/// ```
/// use futures::future::BoxFuture;
/// use rulebook::{Defect, ErrorMessageContainer, Validator};
///
/// struct AdultOnly;
///
/// impl Validator<u32, &'static str, &'static str> for AdultOnly {
///     fn validate<'a>(
///         &'a self,
///         age: &'a u32,
///         errors: &'a ErrorMessageContainer<&'static str, &'static str>,
///     ) -> BoxFuture<'a, Result<(), Defect>> {
///         Box::pin(async move {
///             if *age < 18 {
///                 errors.push("age", "must be an adult");
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Validator<T: ?Sized, K, V>: Send + Sync {
    /// Check `element`, recording violations in `errors`.
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>>;
}

impl<T: ?Sized, K, V, P> Validator<T, K, V> for &P
where
    P: Validator<T, K, V> + ?Sized,
{
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>> {
        (**self).validate(element, errors)
    }
}

impl<T: ?Sized, K, V, P> Validator<T, K, V> for Box<P>
where
    P: Validator<T, K, V> + ?Sized,
{
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>> {
        (**self).validate(element, errors)
    }
}

impl<T: ?Sized, K, V, P> Validator<T, K, V> for Arc<P>
where
    P: Validator<T, K, V> + ?Sized,
{
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>> {
        (**self).validate(element, errors)
    }
}

/// A validator backed by a synchronous closure.
///
/// Created by [`from_fn`].
pub struct FnValidator<F, T: ?Sized, K, V> {
    f: F,
    _marker: PhantomData<fn(&T, &ErrorMessageContainer<K, V>)>,
}

impl<F, T: ?Sized, K, V> fmt::Debug for FnValidator<F, T, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

impl<F, T, K, V> Validator<T, K, V> for FnValidator<F, T, K, V>
where
    F: Fn(&T, &ErrorMessageContainer<K, V>) -> Result<(), Defect> + Send + Sync,
    T: Sync + ?Sized,
    K: Send,
    V: Send,
{
    fn validate<'a>(
        &'a self,
        element: &'a T,
        errors: &'a ErrorMessageContainer<K, V>,
    ) -> BoxFuture<'a, Result<(), Defect>> {
        Box::pin(async move { (self.f)(element, errors) })
    }
}

/// Turn a synchronous rule into a [`Validator`].
///
/// # Examples
///
/// ```
/// use rulebook::{from_fn, validate, ErrorMessage, ErrorMessageContainer};
///
/// # tokio_test::block_on(async {
/// let non_empty = from_fn(|name: &String, errors: &ErrorMessageContainer<&str, &str>| {
///     errors.add_error_unless(!name.is_empty(), || ErrorMessage::new("name", "required"))?;
///     Ok(())
/// });
///
/// let err = validate(&String::new(), [&non_empty]).await.unwrap_err();
/// assert_eq!(err.failure().unwrap().len(), 1);
/// # });
/// ```
pub fn from_fn<F, T, K, V>(f: F) -> FnValidator<F, T, K, V>
where
    F: Fn(&T, &ErrorMessageContainer<K, V>) -> Result<(), Defect> + Send + Sync,
    T: ?Sized,
{
    FnValidator {
        f,
        _marker: PhantomData,
    }
}

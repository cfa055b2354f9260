//! # Rulebook
//!
//! Run independent business rules against a value, concurrently, and report
//! every broken rule at once.
//!
//! ## Overview
//!
//! - A [`Validator`] checks one rule and records violations in a shared
//!   [`ErrorMessageContainer`] instead of returning them.
//! - [`validate`] (or a configured [`ValidationRunner`]) runs all validators,
//!   waits for every one of them, and fails with a [`ValidationFailure`]
//!   listing all recorded [`ErrorMessage`]s.
//! - A validator that breaks unexpectedly produces a [`Defect`], reported
//!   separately from rule violations.
//!
//! Small helpers ship alongside: [`collection`] (chunking, structural
//! equality), [`string`] (case-insensitive enum parsing, whitespace detection)
//! and, with the `http` feature, an `Accept` header route guard in `http`.
//!
//! ## Quick Example
//!
//! ```rust
//! use futures::future::BoxFuture;
//! use rulebook::{validate, Defect, ErrorMessage, ErrorMessageContainer, ValidationError, Validator};
//!
//! struct Signup {
//!     email: String,
//!     age: u32,
//! }
//!
//! struct EmailRule;
//! struct AgeRule;
//!
//! impl Validator<Signup, &'static str, String> for EmailRule {
//!     fn validate<'a>(
//!         &'a self,
//!         signup: &'a Signup,
//!         errors: &'a ErrorMessageContainer<&'static str, String>,
//!     ) -> BoxFuture<'a, Result<(), Defect>> {
//!         Box::pin(async move {
//!             errors.add_error_unless(signup.email.contains('@'), || {
//!                 ErrorMessage::new("email", format!("{:?} is not an address", signup.email))
//!             })?;
//!             Ok(())
//!         })
//!     }
//! }
//!
//! impl Validator<Signup, &'static str, String> for AgeRule {
//!     fn validate<'a>(
//!         &'a self,
//!         signup: &'a Signup,
//!         errors: &'a ErrorMessageContainer<&'static str, String>,
//!     ) -> BoxFuture<'a, Result<(), Defect>> {
//!         Box::pin(async move {
//!             errors.add_error_unless(signup.age >= 18, || {
//!                 ErrorMessage::new("age", "must be 18 or older".to_string())
//!             })?;
//!             Ok(())
//!         })
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let rules: Vec<Box<dyn Validator<Signup, &'static str, String>>> =
//!     vec![Box::new(EmailRule), Box::new(AgeRule)];
//!
//! let signup = Signup { email: "nope".into(), age: 12 };
//! match validate(&signup, &rules).await {
//!     Err(ValidationError::Failed(failure)) => {
//!         // Both rules are reported, not just the first
//!         assert_eq!(failure.len(), 2);
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod collection;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod string;
pub mod testing;
pub mod validation;

// Re-exports
pub use error::InvalidArgument;
pub use validation::{
    from_fn, validate, validate_checked, Defect, ErrorMessage, ErrorMessageContainer,
    FnValidator, ValidationError, ValidationFailure, ValidationRunner, Validator,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::InvalidArgument;
    pub use crate::string::{NamedVariants, StrExt};
    pub use crate::validation::{
        from_fn, validate, Defect, ErrorMessage, ErrorMessageContainer, ValidationError,
        ValidationFailure, ValidationRunner, Validator,
    };
}

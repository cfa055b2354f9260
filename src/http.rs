//! Route selection on the `Accept` header (feature-gated)
//!
//! [`AcceptHeader`] is a predicate over a request's `Accept` header, usable as
//! an actix-web [`Guard`] when the `http` feature is enabled. The header value,
//! cut at its first `+` format suffix, must equal the expected MIME type
//! ignoring ASCII case.
//!
//! # Example
//!
//! ```rust,ignore
//! use actix_web::{web, App, HttpResponse};
//! use rulebook::http::AcceptHeader;
//!
//! let app = App::new().route(
//!     "/orders",
//!     web::get()
//!         .guard(AcceptHeader::new("application/vnd.orders.v2")?)
//!         .to(|| async { HttpResponse::Ok().finish() }),
//! );
//! ```

use actix_web::guard::{Guard, GuardContext};
use actix_web::http::header::{HeaderMap, ACCEPT};

use crate::error::{require, InvalidArgument};

/// Matches requests whose `Accept` header designates one MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptHeader {
    accept_type: String,
}

impl AcceptHeader {
    /// Match `accept_type`, trimmed. No check is made that it is a valid MIME type.
    ///
    /// Fails with [`InvalidArgument`] if `accept_type` is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulebook::http::AcceptHeader;
    ///
    /// let guard = AcceptHeader::new("  application/json ").unwrap();
    /// assert_eq!(guard.accept_type(), "application/json");
    /// assert!(AcceptHeader::new("   ").is_err());
    /// ```
    pub fn new(accept_type: &str) -> Result<Self, InvalidArgument> {
        let trimmed = accept_type.trim();
        if trimmed.is_empty() {
            return Err(InvalidArgument::new("accept_type", "must not be blank"));
        }
        Ok(Self {
            accept_type: trimmed.to_string(),
        })
    }

    /// Like [`new`](Self::new), for a value that may be absent.
    pub fn new_checked(accept_type: Option<&str>) -> Result<Self, InvalidArgument> {
        Self::new(require(accept_type, "accept_type")?)
    }

    /// The expected MIME type.
    pub fn accept_type(&self) -> &str {
        &self.accept_type
    }

    /// Whether the given `Accept` header value selects this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulebook::http::AcceptHeader;
    ///
    /// let guard = AcceptHeader::new("application/vnd.api").unwrap();
    /// assert!(guard.matches(Some("Application/Vnd.Api+json")));
    /// assert!(!guard.matches(Some("application/json")));
    /// assert!(!guard.matches(None));
    /// ```
    pub fn matches(&self, accept: Option<&str>) -> bool {
        let Some(accept) = accept else {
            return false;
        };
        let without_format = accept.split_once('+').map_or(accept, |(head, _)| head);
        self.accept_type.eq_ignore_ascii_case(without_format)
    }

    /// Whether `headers` carry an `Accept` header selecting this type.
    ///
    /// Only the first `Accept` header is considered; a value that is not
    /// visible ASCII never matches.
    pub fn matches_headers(&self, headers: &HeaderMap) -> bool {
        let accept = headers.get(ACCEPT).and_then(|value| value.to_str().ok());
        let matched = self.matches(accept);
        tracing::trace!(expected = %self.accept_type, ?accept, matched, "accept header guard");
        matched
    }
}

impl Guard for AcceptHeader {
    fn check(&self, ctx: &GuardContext<'_>) -> bool {
        self.matches_headers(ctx.head().headers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn request(headers: &[(&'static str, &'static str)]) -> actix_web::dev::ServiceRequest {
        headers
            .iter()
            .fold(TestRequest::default(), |req, header| req.insert_header(*header))
            .to_srv_request()
    }

    #[test]
    fn test_new_with_absent_accept_type_fails() {
        let err = AcceptHeader::new_checked(None).unwrap_err();
        assert_eq!(err.argument(), "accept_type");
        assert_eq!(err.reason(), "value is absent");
    }

    #[test]
    fn test_new_with_blank_accept_type_fails() {
        let err = AcceptHeader::new("     ").unwrap_err();
        assert_eq!(err.reason(), "must not be blank");
    }

    #[test]
    fn test_without_accept_header_does_not_match() {
        let req = request(&[("foo", "bar"), ("linux", "rocks")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(!guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_accept_header_not_matching_expected() {
        let req = request(&[("foo", "bar"), ("accept", "javabetterthandotnet")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(!guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let req = request(&[("linux", "rocks"), ("ACCEPT", "windowssucks")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_expected_accept_header_matches() {
        let req = request(&[("foo", "bar"), ("Accept", "windowssucks")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_unexpected_accept_header_with_format_does_not_match() {
        let req = request(&[("Accept", "dotnetsucks+microsoft")]);
        let guard = AcceptHeader::new("   windowssucks   ").unwrap();
        assert!(!guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_expected_accept_header_with_format_matches() {
        let req = request(&[("Accept", "windowssucks+microsoft")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_expected_accept_header_with_format_and_bad_case_matches() {
        let req = request(&[("Accept", "WindowsSucks+microsoft")]);
        let guard = AcceptHeader::new("windowssucks").unwrap();
        assert!(guard.check(&req.guard_ctx()));
    }

    #[test]
    fn test_suffix_is_cut_at_first_plus() {
        let guard = AcceptHeader::new("application/vnd.api").unwrap();
        assert!(guard.matches(Some("application/vnd.api+json+gzip")));
        assert!(!guard.matches(Some("application/vnd.api.v2+json")));
        assert!(!guard.matches(Some("+application/vnd.api")));
    }
}

//! Runner configuration as plain data (feature-gated)
//!
//! [`RunnerConfig`] lets a [`ValidationRunner`] be described in a config file
//! and deserialized when the `serde` feature is enabled. Every field is
//! optional; missing fields keep the runner defaults.
//!
//! # Example
//!
//! ```rust,ignore
//! use rulebook::validation::{RunnerConfig, ValidationRunner};
//!
//! let config: RunnerConfig = serde_json::from_str(
//!     r#"{ "timeout_ms": 250, "concurrency_limit": 8, "summary": "signup rejected" }"#,
//! )?;
//! let runner = ValidationRunner::try_from(config)?;
//! assert_eq!(runner.concurrency_limit(), Some(8));
//! ```

use serde::{Deserialize, Serialize};

use super::runner::ValidationRunner;
use crate::error::InvalidArgument;

/// Serializable settings for a [`ValidationRunner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Bound on the whole run, in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Maximum number of validators polled at once. Must be positive.
    pub concurrency_limit: Option<usize>,
    /// Summary of failed runs.
    pub summary: Option<String>,
}

impl TryFrom<RunnerConfig> for ValidationRunner {
    type Error = InvalidArgument;

    fn try_from(config: RunnerConfig) -> Result<Self, Self::Error> {
        let mut runner = ValidationRunner::new();
        if let Some(limit) = config.concurrency_limit {
            runner = runner.try_with_concurrency_limit(limit)?;
        }
        if let Some(summary) = config.summary {
            runner = runner.with_summary(summary);
        }
        if let Some(ms) = config.timeout_ms {
            runner = with_timeout_ms(runner, ms)?;
        }
        Ok(runner)
    }
}

impl From<&ValidationRunner> for RunnerConfig {
    fn from(runner: &ValidationRunner) -> Self {
        Self {
            timeout_ms: runner
                .timeout()
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            concurrency_limit: runner.concurrency_limit(),
            summary: Some(runner.summary().to_string()),
        }
    }
}

#[cfg(feature = "async")]
fn with_timeout_ms(runner: ValidationRunner, ms: u64) -> Result<ValidationRunner, InvalidArgument> {
    Ok(runner.with_timeout(std::time::Duration::from_millis(ms)))
}

#[cfg(not(feature = "async"))]
fn with_timeout_ms(_: ValidationRunner, _: u64) -> Result<ValidationRunner, InvalidArgument> {
    Err(InvalidArgument::new(
        "timeout_ms",
        "timeouts require the `async` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gives_default_runner() {
        let config: RunnerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(ValidationRunner::try_from(config).unwrap(), ValidationRunner::new());
    }

    #[test]
    fn test_full_config() {
        let config: RunnerConfig = serde_json::from_str(
            r#"{ "timeout_ms": 250, "concurrency_limit": 8, "summary": "signup rejected" }"#,
        )
        .unwrap();
        let runner = ValidationRunner::try_from(config).unwrap();

        assert_eq!(runner.concurrency_limit(), Some(8));
        assert_eq!(runner.summary(), "signup rejected");
        #[cfg(feature = "async")]
        assert_eq!(runner.timeout(), Some(std::time::Duration::from_millis(250)));
    }

    #[test]
    fn test_zero_concurrency_limit_is_rejected() {
        let config = RunnerConfig {
            concurrency_limit: Some(0),
            ..Default::default()
        };
        let err = ValidationRunner::try_from(config).unwrap_err();
        assert_eq!(err.argument(), "concurrency_limit");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<RunnerConfig, _> = serde_json::from_str(r#"{ "retries": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_runner_round_trips_through_config() {
        let runner = ValidationRunner::new()
            .with_concurrency_limit(2)
            .with_summary("nope");
        let config = RunnerConfig::from(&runner);
        assert_eq!(ValidationRunner::try_from(config).unwrap(), runner);
    }
}

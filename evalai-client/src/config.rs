//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ErrorCode;

/// Default platform base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default delay the backoff strategies scale from.
pub const BASE_RETRY_DELAY: Duration = Duration::from_millis(1_000);

/// Upper bound on a server-requested `retryAfter`.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Settings for [`HttpEvaluationClient`](crate::HttpEvaluationClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Used when a request does not name its own organization.
    pub organization_id: Option<u64>,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization_id(mut self, id: u64) -> Self {
        self.organization_id = Some(id);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    #[default]
    Exponential,
    Linear,
    Fixed,
}

/// Retry policy for failed requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Delay the backoff strategy scales from.
    pub base_delay: Duration,
    pub retryable: Vec<ErrorCode>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Exponential,
            base_delay: BASE_RETRY_DELAY,
            retryable: vec![
                ErrorCode::RateLimitExceeded,
                ErrorCode::Timeout,
                ErrorCode::NetworkError,
                ErrorCode::InternalServerError,
            ],
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Whether an error with `code` should be retried.
    pub fn is_retryable(&self, code: &ErrorCode) -> bool {
        self.retryable.contains(code)
    }

    /// Delay before the next attempt, after `attempt` (1-based) failed.
    ///
    /// A server-requested `retry_after` replaces the computed delay.
    pub fn delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(retry_after) = retry_after {
            return retry_after.min(MAX_RETRY_AFTER);
        }
        let attempt = attempt.max(1);
        match self.backoff {
            Backoff::Exponential => {
                self.base_delay.saturating_mul(2u32.saturating_pow(attempt - 1))
            }
            Backoff::Linear => self.base_delay.saturating_mul(attempt),
            Backoff::Fixed => self.base_delay,
        }
    }
}

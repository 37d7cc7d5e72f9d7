//! Error types for the evaluation client.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the evaluation platform.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was supplied at construction.
    #[error("API key is required (set EVALAI_API_KEY)")]
    MissingApiKey,

    /// The platform rejected the request or could not be reached.
    #[error("{code}: {message}")]
    Api {
        /// Platform error code.
        code: ErrorCode,
        /// Human-readable message from the platform or transport.
        message: String,
        /// HTTP status, `0` when no response was received.
        status: u16,
        /// Server-requested delay before retrying (rate limits only).
        retry_after: Option<Duration>,
    },

    /// A successful response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build an API error with no HTTP status, e.g. for transport failures.
    pub fn api(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            status: 0,
            retry_after: None,
        }
    }

    /// Platform error code, if this is an API error.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Server-requested retry delay, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Api {
                code: ErrorCode::Timeout,
                message: "request timeout".to_string(),
                status: 408,
                retry_after: None,
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::api(ErrorCode::NetworkError, err.to_string())
        }
    }
}

/// Error codes reported by the evaluation platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Timeout,
    ValidationError,
    RateLimitExceeded,
    InternalServerError,
    NetworkError,
    FeatureLimitReached,
    MissingOrganizationId,
    Unknown,
    /// Any code the platform sends that this client does not know about.
    Other(String),
}

impl ErrorCode {
    /// Parse a wire code such as `RATE_LIMIT_EXCEEDED`.
    pub fn parse(code: &str) -> Self {
        match code {
            "UNAUTHORIZED" => Self::Unauthorized,
            "FORBIDDEN" => Self::Forbidden,
            "NOT_FOUND" => Self::NotFound,
            "TIMEOUT" => Self::Timeout,
            "VALIDATION_ERROR" => Self::ValidationError,
            "RATE_LIMIT_EXCEEDED" => Self::RateLimitExceeded,
            "INTERNAL_SERVER_ERROR" => Self::InternalServerError,
            "NETWORK_ERROR" => Self::NetworkError,
            "FEATURE_LIMIT_REACHED" => Self::FeatureLimitReached,
            "MISSING_ORGANIZATION_ID" => Self::MissingOrganizationId,
            "UNKNOWN_ERROR" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Map an HTTP status to the code used when the body names none.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            408 => Self::Timeout,
            422 => Self::ValidationError,
            429 => Self::RateLimitExceeded,
            500.. => Self::InternalServerError,
            _ => Self::Unknown,
        }
    }

    /// Wire representation of the code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Timeout => "TIMEOUT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::FeatureLimitReached => "FEATURE_LIMIT_REACHED",
            Self::MissingOrganizationId => "MISSING_ORGANIZATION_ID",
            Self::Unknown => "UNKNOWN_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

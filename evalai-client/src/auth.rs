//! API key handling.
//!
//! Keys are wrapped in [`SecretString`] so they never end up in logs or
//! `Debug` output by accident.
//!
//! # Example
//!
//! ```ignore
//! use evalai_client::auth::ApiKey;
//!
//! // Reads EVALAI_API_KEY, then AI_EVAL_API_KEY
//! let key: Option<ApiKey> = ApiKey::from_env();
//! ```

use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Environment variables checked for an API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["EVALAI_API_KEY", "AI_EVAL_API_KEY"];

/// A secure API key that prevents accidental logging.
///
/// The key is wrapped in `SecretString` which:
/// - Zeroizes memory on drop
/// - Requires explicit `.expose_secret()` to access the value
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Create a new API key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Read the key from the environment.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Option<Self> {
        API_KEY_ENV_VARS.iter().find_map(|var| {
            let value = env::var(var).ok().filter(|v| !v.trim().is_empty())?;
            debug!(var, "retrieved API key from environment");
            Some(Self::new(value))
        })
    }

    /// Expose the secret key value.
    ///
    /// Use sparingly - only when actually sending to an API.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

use std::path::PathBuf;
use std::time::Duration;

use evalai_client::{ApiKey, Backoff, ClientConfig, RetryConfig};
use serde::Deserialize;

/// Default file the result is written to, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "demo-run.json";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawEvalConfig {
    #[serde(default)]
    pub client: RawClientSection,

    #[serde(default)]
    pub output: RawOutputSection,
}

/// `[client]` section as stored in TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawClientSection {
    /// Platform base URL
    pub base_url: Option<String>,

    /// Organization requests are scoped to
    pub organization_id: Option<u64>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub retry: RawRetrySection,
}

/// `[client.retry]` section as stored in TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawRetrySection {
    /// Total attempts including the first
    pub max_attempts: Option<u32>,

    /// exponential | linear | fixed
    pub backoff: Option<Backoff>,
}

/// `[output]` section as stored in TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RawOutputSection {
    /// Where the result JSON is written
    pub path: Option<PathBuf>,
}

/// Final configuration handed to the runner.
///
/// The API key is carried as-is; the runner never validates it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: Option<ApiKey>,
    pub client: ClientConfig,
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            client: ClientConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RunConfig {
    /// Apply defaults to a merged raw config.
    ///
    /// A zero timeout or attempt count counts as unset.
    pub fn from_raw(raw: RawEvalConfig, api_key: Option<ApiKey>) -> Self {
        let defaults = ClientConfig::default();
        let retry_defaults = RetryConfig::default();

        let client = ClientConfig {
            base_url: raw.client.base_url.unwrap_or(defaults.base_url),
            organization_id: raw.client.organization_id,
            timeout: raw
                .client
                .timeout_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            retry: RetryConfig {
                max_attempts: raw
                    .client
                    .retry
                    .max_attempts
                    .filter(|&n| n > 0)
                    .unwrap_or(retry_defaults.max_attempts),
                backoff: raw.client.retry.backoff.unwrap_or(retry_defaults.backoff),
                ..retry_defaults
            },
        };

        Self {
            api_key,
            client,
            output: raw
                .output
                .path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = RunConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.client, ClientConfig::default());
        assert_eq!(config.output, PathBuf::from("demo-run.json"));
    }

    #[test]
    fn test_raw_config_partial_parsing() {
        let toml_str = r#"
[client]
base_url = "https://eval.example.com"

[client.retry]
backoff = "linear"
"#;
        let raw: RawEvalConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(
            raw.client.base_url.as_deref(),
            Some("https://eval.example.com")
        );
        assert_eq!(raw.client.retry.backoff, Some(Backoff::Linear));
        assert!(raw.client.retry.max_attempts.is_none());
        assert!(raw.client.timeout_ms.is_none());
        assert!(raw.output.path.is_none());
    }

    #[test]
    fn test_raw_config_empty_uses_none() {
        let raw: RawEvalConfig = toml::from_str("").unwrap();
        assert_eq!(raw, RawEvalConfig::default());
    }

    #[test]
    fn test_from_raw_applies_values_and_defaults() {
        let raw: RawEvalConfig = toml::from_str(
            r#"
[client]
organization_id = 42
timeout_ms = 5000

[client.retry]
max_attempts = 5

[output]
path = "out/run.json"
"#,
        )
        .unwrap();

        let config = RunConfig::from_raw(raw, Some(ApiKey::new("k")));

        assert_eq!(config.api_key.unwrap().expose_secret(), "k");
        assert_eq!(config.client.base_url, "http://localhost:3000");
        assert_eq!(config.client.organization_id, Some(42));
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.client.retry.max_attempts, 5);
        assert_eq!(config.client.retry.backoff, Backoff::Exponential);
        assert_eq!(config.output, PathBuf::from("out/run.json"));
    }

    #[test]
    fn test_zero_timeout_and_attempts_fall_back_to_defaults() {
        let toml_str = r#"
[client]
timeout_ms = 0

[client.retry]
max_attempts = 0
"#;
        let raw: RawEvalConfig = toml::from_str(toml_str).unwrap();
        let config = RunConfig::from_raw(raw, None);

        assert_eq!(config.client.timeout, Duration::from_secs(30));
        assert_eq!(config.client.retry.max_attempts, 3);
    }
}

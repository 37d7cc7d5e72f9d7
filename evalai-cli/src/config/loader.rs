use super::types::{
    RawClientSection, RawEvalConfig, RawOutputSection, RawRetrySection, RunConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use evalai_client::{ApiKey, Backoff};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user file, project file, environment)
    ///
    /// Variables from a `.env` file must already be loaded into the process
    /// environment; see `dotenvy::dotenv`.
    pub fn load() -> Result<RunConfig> {
        let mut paths = Vec::new();
        if let Some(user_path) = Self::user_config_path() {
            paths.push(user_path);
        }
        paths.push(Self::project_config_path());

        // Layers 1 + 2: config files
        let files = Self::load_files(&paths)?;

        // Layer 3: environment
        let env = Self::env_overlay(|key| std::env::var(key).ok());
        let raw = Self::merge_raw(files, env);

        Ok(RunConfig::from_raw(raw, ApiKey::from_env()))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "evalai").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with EVALAI_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("EVALAI_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".evalai/config.toml")
        }
    }

    /// Read and merge config files in order; later files win. Missing files are skipped.
    pub fn load_files(paths: &[PathBuf]) -> Result<RawEvalConfig> {
        let mut raw = RawEvalConfig::default();
        for path in paths {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "loading config file");
            raw = Self::merge_raw(raw, Self::read_file(path)?);
        }
        Ok(raw)
    }

    fn read_file(path: &Path) -> Result<RawEvalConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Build a config layer from environment variables.
    ///
    /// Unparseable numeric values are ignored with a warning.
    pub fn env_overlay(lookup: impl Fn(&str) -> Option<String>) -> RawEvalConfig {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let organization_id = get("EVALAI_ORGANIZATION_ID")
            .or_else(|| get("AI_EVAL_ORGANIZATION_ID"))
            .and_then(|v| parse_or_warn::<u64>("organization id", &v));
        let timeout_ms =
            get("EVALAI_TIMEOUT_MS").and_then(|v| parse_or_warn::<u64>("timeout", &v));
        let max_attempts =
            get("EVALAI_MAX_RETRIES").and_then(|v| parse_or_warn::<u32>("max retries", &v));
        let backoff = get("EVALAI_RETRY_BACKOFF").and_then(|v| parse_backoff(&v));

        RawEvalConfig {
            client: RawClientSection {
                base_url: get("EVALAI_BASE_URL"),
                organization_id,
                timeout_ms,
                retry: RawRetrySection {
                    max_attempts,
                    backoff,
                },
            },
            output: RawOutputSection {
                path: get("EVALAI_OUTPUT").map(PathBuf::from),
            },
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    pub fn merge_raw(base: RawEvalConfig, overlay: RawEvalConfig) -> RawEvalConfig {
        RawEvalConfig {
            client: RawClientSection {
                base_url: overlay.client.base_url.or(base.client.base_url),
                organization_id: overlay.client.organization_id.or(base.client.organization_id),
                timeout_ms: overlay.client.timeout_ms.or(base.client.timeout_ms),
                retry: RawRetrySection {
                    max_attempts: overlay
                        .client
                        .retry
                        .max_attempts
                        .or(base.client.retry.max_attempts),
                    backoff: overlay.client.retry.backoff.or(base.client.retry.backoff),
                },
            },
            output: RawOutputSection {
                path: overlay.output.path.or(base.output.path),
            },
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(what: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(value, "ignoring invalid {what}");
            None
        }
    }
}

fn parse_backoff(value: &str) -> Option<Backoff> {
    match value.trim().to_ascii_lowercase().as_str() {
        "exponential" => Some(Backoff::Exponential),
        "linear" => Some(Backoff::Linear),
        "fixed" => Some(Backoff::Fixed),
        other => {
            warn!(value = other, "ignoring invalid retry backoff");
            None
        }
    }
}

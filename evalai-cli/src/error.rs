//! Error type for a demo run.

use std::path::PathBuf;

use thiserror::Error;

/// Anything that can stop a run.
///
/// Every variant maps to the same outcome at the top level (a printed
/// message and exit status 1); the variants only say where it went wrong.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0:#}")]
    Config(#[source] anyhow::Error),

    /// The evaluation client could not be constructed.
    #[error("failed to create evaluation client: {0}")]
    ClientConstruction(#[source] evalai_client::Error),

    /// The evaluation request failed.
    #[error("evaluation request failed: {0}")]
    Request(#[source] evalai_client::Error),

    /// The result could not be serialized.
    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The result file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The console report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalai_client::ErrorCode;

    #[test]
    fn request_error_keeps_client_message() {
        let err = RunError::Request(evalai_client::Error::api(
            ErrorCode::NetworkError,
            "network timeout",
        ));
        assert_eq!(
            err.to_string(),
            "evaluation request failed: NETWORK_ERROR: network timeout"
        );
    }

    #[test]
    fn io_error_names_the_path() {
        let err = RunError::Io {
            path: PathBuf::from("out/demo-run.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write out/demo-run.json: denied");
    }

    #[test]
    fn config_error_shows_context_chain() {
        let err = RunError::Config(anyhow::anyhow!("bad toml").context("failed to parse x.toml"));
        assert_eq!(
            err.to_string(),
            "configuration error: failed to parse x.toml: bad toml"
        );
    }
}

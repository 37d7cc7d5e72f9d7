//! The demo run: submit one evaluation, report it, save it.

use std::io::Write;
use std::path::{Path, PathBuf};

use evalai_client::{
    ApiKey, ClientConfig, EvaluationClient, EvaluationRequest, EvaluationResult,
    HttpEvaluationClient,
};
use tokio::fs;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::error::RunError;

/// Dataset the demo evaluates.
pub const DATASET_ID: &str = "public-demo-chatbot";

/// Metrics computed for the demo, in order.
pub const METRICS: [&str; 2] = ["factuality", "toxicity"];

pub const RUN_NAME: &str = "Demo Chatbot Evaluation";

pub const RUN_DESCRIPTION: &str = "Testing chatbot responses for accuracy and safety";

/// The fixed request every demo run submits.
pub fn demo_request() -> EvaluationRequest {
    EvaluationRequest::new(DATASET_ID, METRICS)
        .name(RUN_NAME)
        .description(RUN_DESCRIPTION)
}

/// Client factory for the platform's HTTP API.
pub fn connect_http(
    config: ClientConfig,
) -> impl FnOnce(Option<ApiKey>) -> evalai_client::Result<HttpEvaluationClient> {
    move |api_key| HttpEvaluationClient::new(config, api_key)
}

/// Run one evaluation end-to-end.
///
/// `connect` receives the configured API key exactly as loaded, possibly
/// `None`. The console report goes to `out`; the result is written to
/// `config.output` and returned.
pub async fn run_demo<F, C, W>(
    config: &RunConfig,
    connect: F,
    out: &mut W,
) -> Result<EvaluationResult, RunError>
where
    F: FnOnce(Option<ApiKey>) -> evalai_client::Result<C>,
    C: EvaluationClient,
    W: Write,
{
    let client = connect(config.api_key.clone()).map_err(RunError::ClientConstruction)?;

    writeln!(out, "🚀 Starting evaluation...\n")?;
    info!(dataset_id = DATASET_ID, metrics = ?METRICS, "submitting evaluation");

    let result = client
        .submit(demo_request())
        .await
        .map_err(RunError::Request)?;

    info!(
        overall = %result.overall,
        passed = %result.passed,
        failed = %result.failed,
        "evaluation complete"
    );
    write_report(out, &result)?;

    save_result(&result, &config.output).await?;
    writeln!(out, "💾 Results saved to {}", config.output.display())?;

    Ok(result)
}

/// Print the human-readable summary of a result.
pub fn write_report<W: Write>(out: &mut W, result: &EvaluationResult) -> std::io::Result<()> {
    writeln!(out, "✅ Evaluation complete!\n")?;
    writeln!(out, "📊 Overall Score: {}", result.overall)?;
    writeln!(out, "✓ Passed: {}", result.passed)?;
    writeln!(out, "✗ Failed: {}", result.failed)?;
    writeln!(out, "⏱️  Avg Latency: {}ms", result.avg_latency)?;
    writeln!(out, "💰 Total Cost: ${}\n", result.total_cost)?;
    Ok(())
}

/// Write `result` to `path` as 2-space indented JSON, replacing any existing file.
///
/// The document is serialized before anything is written, then staged in a
/// sibling temp file and renamed over `path`, so `path` only ever holds a
/// complete document.
pub async fn save_result(result: &EvaluationResult, path: &Path) -> Result<(), RunError> {
    let content = serde_json::to_string_pretty(result)?;

    let staging = staging_path(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(source) = fs::write(&staging, &content).await {
        let _ = fs::remove_file(&staging).await;
        return Err(RunError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(RunError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), bytes = content.len(), "saved result");
    Ok(())
}

fn staging_path(path: &Path) -> std::io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "output path has no file name")
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}

//! End-to-end tests for the evalai-demo binary
//!
//! These spawn the compiled binary against a mock platform and are gated
//! behind the `integration` feature flag. Run with:
//!
//! ```sh
//! cargo test -p evalai-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary in `dir` with a clean evalai environment plus `vars`.
fn run_demo_binary(dir: &TempDir, vars: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_evalai-demo"));
    cmd.current_dir(dir.path())
        .env("EVALAI_PROJECT_CONFIG_DIR", dir.path().join(".evalai"))
        .env("EVALAI_MAX_RETRIES", "1")
        .env_remove("EVALAI_API_KEY")
        .env_remove("AI_EVAL_API_KEY")
        .env_remove("EVALAI_BASE_URL")
        .env_remove("EVALAI_ORGANIZATION_ID")
        .env_remove("AI_EVAL_ORGANIZATION_ID")
        .env_remove("EVALAI_OUTPUT");
    for (key, value) in vars {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to run evalai-demo")
}

#[test]
fn help_works() {
    let output = Command::new(env!("CARGO_BIN_EXE_evalai-demo"))
        .arg("--help")
        .output()
        .expect("Failed to run evalai-demo --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Run a demo evaluation"));
    assert!(stdout.contains("--output"));
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_run_writes_demo_run_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/evaluations"))
        .and(header("authorization", "Bearer e2e-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "overall": 0.92,
            "passed": 18,
            "failed": 2,
            "avg_latency": 340.0,
            "total_cost": 1.25
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let (output, file) = tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let output = run_demo_binary(
            &dir,
            &[("EVALAI_API_KEY", "e2e-key"), ("EVALAI_BASE_URL", uri.as_str())],
        );
        let file = std::fs::read_to_string(dir.path().join("demo-run.json")).ok();
        (output, file)
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Evaluation complete!"));
    assert!(stdout.contains("💾 Results saved to demo-run.json"));

    let saved: serde_json::Value = serde_json::from_str(&file.expect("demo-run.json missing")).unwrap();
    assert_eq!(saved["passed"], 18);
    assert_eq!(saved["total_cost"], 1.25);
}

#[test]
fn missing_key_fails_with_exit_code_one() {
    let dir = TempDir::new().unwrap();
    let output = run_demo_binary(&dir, &[("EVALAI_BASE_URL", "http://127.0.0.1:1")]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌ Error running evaluation:"));
    assert!(stdout.contains("API key is required"));
    assert!(!dir.path().join("demo-run.json").exists());
}

#[test]
fn unreachable_platform_fails_with_exit_code_one() {
    let dir = TempDir::new().unwrap();
    let output = run_demo_binary(
        &dir,
        &[
            ("EVALAI_API_KEY", "e2e-key"),
            ("EVALAI_BASE_URL", "http://127.0.0.1:1"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NETWORK_ERROR"));
    assert!(!dir.path().join("demo-run.json").exists());
}

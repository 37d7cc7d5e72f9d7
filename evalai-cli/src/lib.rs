//! Demo evaluation runner for the AI evaluation platform.
//!
//! Loads configuration, submits one fixed evaluation through an
//! [`EvaluationClient`](evalai_client::EvaluationClient), prints a short
//! report and saves the full result to `demo-run.json`.

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

pub use config::{ConfigLoader, RunConfig};
pub use error::RunError;
pub use runner::{connect_http, demo_request, run_demo};

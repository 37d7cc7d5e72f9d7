//! Client for the AI evaluation platform.
//!
//! This crate provides:
//! - Request and result records for evaluation runs
//! - The [`EvaluationClient`] capability trait
//! - An HTTP implementation with bearer auth, status mapping and retry
//! - API key handling that keeps secrets out of logs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            dyn EvaluationClient              │
//! │   ┌──────────────────────┐  ┌────────────┐   │
//! │   │ HttpEvaluationClient │  │ test stubs │   │
//! │   └──────────────────────┘  └────────────┘   │
//! └──────────────────────────────────────────────┘
//!                  │
//!                  ▼
//!     POST {base_url}/api/evaluations
//!     Authorization: Bearer <ApiKey>
//! ```

mod error;
mod types;

pub mod auth;
pub mod client;
pub mod config;

pub use auth::ApiKey;
pub use client::{EvaluationClient, HttpEvaluationClient};
pub use config::{Backoff, ClientConfig, RetryConfig};
pub use error::{Error, ErrorCode, Result};
pub use types::{EvaluationRequest, EvaluationResult, Tally};

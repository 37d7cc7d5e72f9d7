//! The evaluation client capability and its HTTP implementation.
//!
//! The [`EvaluationClient`] trait is the one seam callers program against:
//! submit a request, get a result. [`HttpEvaluationClient`] talks to the
//! platform; tests substitute their own implementation.
//!
//! # Example
//!
//! ```ignore
//! use evalai_client::{EvaluationClient, EvaluationRequest};
//!
//! async fn evaluate(client: &dyn EvaluationClient) -> evalai_client::Result<()> {
//!     let request = EvaluationRequest::new("public-demo-chatbot", ["factuality"])
//!         .name("Nightly");
//!     let result = client.submit(request).await?;
//!     println!("overall: {}", result.overall);
//!     Ok(())
//! }
//! ```

mod http;

use std::sync::Arc;

use async_trait::async_trait;

pub use http::{HttpEvaluationClient, USER_AGENT};

use crate::{EvaluationRequest, EvaluationResult, Result};

/// Something that can run an evaluation on the platform.
#[async_trait]
pub trait EvaluationClient: Send + Sync {
    /// Submit one evaluation request and wait for its result.
    async fn submit(&self, request: EvaluationRequest) -> Result<EvaluationResult>;
}

#[async_trait]
impl<T: EvaluationClient + ?Sized> EvaluationClient for &T {
    async fn submit(&self, request: EvaluationRequest) -> Result<EvaluationResult> {
        (**self).submit(request).await
    }
}

#[async_trait]
impl<T: EvaluationClient + ?Sized> EvaluationClient for Box<T> {
    async fn submit(&self, request: EvaluationRequest) -> Result<EvaluationResult> {
        (**self).submit(request).await
    }
}

#[async_trait]
impl<T: EvaluationClient + ?Sized> EvaluationClient for Arc<T> {
    async fn submit(&self, request: EvaluationRequest) -> Result<EvaluationResult> {
        (**self).submit(request).await
    }
}

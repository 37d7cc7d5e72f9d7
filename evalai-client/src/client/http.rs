//! HTTP transport: auth headers, status mapping, retry.
//!
//! All status code handling lives here; the public client surface never
//! sees a raw response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::EvaluationClient;
use crate::auth::ApiKey;
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::{Error, ErrorCode, EvaluationRequest, EvaluationResult, Result};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("evalai-client/", env!("CARGO_PKG_VERSION"));

const EVALUATIONS_PATH: &str = "/api/evaluations";

/// Evaluation client backed by the platform's REST API.
#[derive(Debug, Clone)]
pub struct HttpEvaluationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    config: ClientConfig,
}

impl HttpEvaluationClient {
    /// Create a client for `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if the key is absent or blank, and
    /// [`Error::InvalidConfig`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, api_key: Option<ApiKey>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.is_blank())
            .ok_or(Error::MissingApiKey)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // zero means unset
        let timeout = if config.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            config.timeout
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to create HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        debug!(
            base_url = %base_url,
            has_organization_id = config.organization_id.is_some(),
            "evaluation client initialized"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
            config,
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an evaluation and return its result.
    pub async fn create_evaluation(
        &self,
        mut request: EvaluationRequest,
    ) -> Result<EvaluationResult> {
        if request.organization_id.is_none() {
            request.organization_id = self.config.organization_id;
        }
        self.post(EVALUATIONS_PATH, &request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_vec(body)?;
        let retry = &self.config.retry;
        let mut attempt = 1;

        loop {
            match self.post_once(&url, &body).await {
                Ok(value) => {
                    return serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()));
                }
                Err(e) if attempt < retry.max_attempts && is_retryable(&e, retry) => {
                    let delay = retry.delay(attempt, e.retry_after());
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_attempts = retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        url = %url,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post_once(&self, url: &str, body: &[u8]) -> Result<Value> {
        debug!(method = "POST", url, bytes = body.len(), "sending request");
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status();
        let retry_after_header = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let reason = status.canonical_reason().unwrap_or("request failed");
        let text = response.text().await?;

        debug!(
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "received response"
        );

        let data: Value = if text.trim().is_empty() {
            Value::Object(Default::default())
        } else if status.is_success() {
            serde_json::from_str(&text).map_err(|e| Error::Decode(e.to_string()))?
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()))
        };

        if status.is_success() {
            Ok(data)
        } else {
            Err(error_from_response(
                status.as_u16(),
                reason,
                &data,
                retry_after_header,
            ))
        }
    }
}

fn is_retryable(err: &Error, retry: &crate::RetryConfig) -> bool {
    err.code().is_some_and(|code| retry.is_retryable(code))
}

/// Build an API error from a non-success response body.
///
/// A `code` in the body wins over the status mapping; the message comes
/// from `error`, then `message`, then the status reason.
fn error_from_response(
    status: u16,
    reason: &str,
    data: &Value,
    retry_after_header: Option<u64>,
) -> Error {
    let code = data
        .get("code")
        .and_then(Value::as_str)
        .map(ErrorCode::parse)
        .unwrap_or_else(|| ErrorCode::from_status(status));

    let message = data
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| data.get("message").and_then(Value::as_str))
        .or_else(|| data.as_str().filter(|s| !s.trim().is_empty()))
        .unwrap_or(reason)
        .to_string();

    let retry_after = if code == ErrorCode::RateLimitExceeded {
        data.get("retryAfter")
            .and_then(Value::as_u64)
            .or(retry_after_header)
            .map(Duration::from_secs)
    } else {
        None
    };

    Error::Api {
        code,
        message,
        status,
        retry_after,
    }
}

#[async_trait]
impl EvaluationClient for HttpEvaluationClient {
    async fn submit(&self, request: EvaluationRequest) -> Result<EvaluationResult> {
        self.create_evaluation(request).await
    }
}

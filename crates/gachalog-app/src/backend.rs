// Client for the analysis backend.
//
// `GachaBackend` is the seam the orchestrator and poller depend on;
// `HttpBackend` talks to the real server over reqwest. Response bodies are
// decoded regardless of HTTP status because the backend reports rejections
// as 4xx/5xx with a JSON `error` field.

use async_trait::async_trait;
use gachalog_core::identity::TaskId;
use gachalog_core::protocol::{AnalysisRequest, AnalysisResponse, ProgressPayload};
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub const PROGRESS_PATH: &str = "/api/getPage";
pub const ANALYSIS_PATH: &str = "/api/gachaLog";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait GachaBackend: Send + Sync {
    /// Current progress of the job tagged with `task_id`.
    async fn fetch_progress(&self, task_id: &TaskId) -> Result<ProgressPayload, BackendError>;

    /// Run an analysis and wait for its single response.
    async fn submit_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, BackendError>;
}

/// Per-request limit on progress queries unless configured otherwise.
pub const DEFAULT_PROGRESS_TIMEOUT: Duration = Duration::from_secs(2);

/// reqwest-backed implementation. The analysis request has no timeout: it
/// pages through the whole history and takes as long as it takes. Progress
/// queries are bounded so a stalled backend cannot pile up pending polls.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    progress_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            progress_timeout: DEFAULT_PROGRESS_TIMEOUT,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.server.base_url.clone())
            .with_progress_timeout(config.polling.request_timeout())
    }

    pub fn with_progress_timeout(mut self, timeout: Duration) -> Self {
        self.progress_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GachaBackend for HttpBackend {
    async fn fetch_progress(&self, task_id: &TaskId) -> Result<ProgressPayload, BackendError> {
        let response = self
            .http
            .get(self.endpoint(PROGRESS_PATH))
            .query(&[("task_id", task_id.as_str())])
            .timeout(self.progress_timeout)
            .send()
            .await?;
        decode(PROGRESS_PATH, response).await
    }

    async fn submit_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, BackendError> {
        let response = self
            .http
            .post(self.endpoint(ANALYSIS_PATH))
            .json(request)
            .send()
            .await?;
        decode(ANALYSIS_PATH, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await?;
    debug!(endpoint, %status, bytes = body.len(), "backend response");
    serde_json::from_slice(&body).map_err(|source| BackendError::Decode { endpoint, source })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

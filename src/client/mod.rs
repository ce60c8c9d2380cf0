//! Relay client
//!
//! Caller-side wrapper around `POST /api/glauc/analyze`. [`RelayClient::analyze`]
//! always settles to a displayable string: every failure is logged and
//! replaced with a fixed fallback message, so a UI built on it never shows
//! a raw error.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::schemas::AnalysisRequest;

/// Shown when the relay cannot be reached or answers with a failure
pub const UNREACHABLE_FALLBACK: &str = "Simulated Backend Response: The server is unreachable. \
     Please ensure the Glauc backend is running and reachable.";

/// Shown when the relay answers successfully but without a result
pub const MISSING_RESULT_FALLBACK: &str = "Unable to analyze at this time.";

/// Relay route, relative to the base URL
const ANALYZE_PATH: &str = "/api/glauc/analyze";

/// Errors observed while calling the relay
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Relay returned status {0}")]
    Status(u16),

    #[error("Failed to decode relay response: {0}")]
    Decode(String),
}

/// Relay client configuration
#[derive(Debug, Clone)]
pub struct RelayClientConfig {
    /// Relay base URL, e.g. http://localhost:5000
    pub base_url: String,

    /// Deadline for one call
    pub timeout: Duration,
}

impl Default for RelayClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RelayClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults overridden by `GLAUC_SERVER_URL` and `GLAUC_CLIENT_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = std::env::var("GLAUC_SERVER_URL")
            .ok()
            .filter(|s| !s.is_empty())
        {
            config.base_url = url;
        }

        if let Some(secs) = std::env::var("GLAUC_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }
}

/// Loose view of the relay body: a 2xx without `result` is not an error
#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    result: Option<String>,
}

/// Client for the analysis relay
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(config: RelayClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!("{}{}", config.base_url.trim_end_matches('/'), ANALYZE_PATH);

        Ok(Self { client, endpoint })
    }

    /// Analyze `prompt`, falling back to a fixed message on any failure
    pub async fn analyze(&self, prompt: &str) -> String {
        match self.try_analyze(prompt).await {
            Ok(Some(result)) => result,
            Ok(None) => MISSING_RESULT_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "Relay call failed");
                UNREACHABLE_FALLBACK.to_string()
            }
        }
    }

    /// Analyze `prompt`, reporting failures instead of hiding them
    ///
    /// `Ok(None)` means the relay answered successfully without a result.
    pub async fn try_analyze(&self, prompt: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalysisRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: RelayResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(parsed.result.filter(|r| !r.is_empty()))
    }
}

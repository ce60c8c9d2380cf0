//! Gemini service for Google Gemini API interactions
//!
//! Sends a single non-streaming `generateContent` call per prompt. The API
//! key is sent in the `x-goog-api-key` header so it never appears in URLs
//! or access logs. Each call is bounded by the configured deadline.

use crate::config::GeminiSettings;
use crate::error::ApiError;
use crate::schemas::gemini::{GeminiError, GeminiRequest, GeminiResponse};
use crate::utils::{with_timeout, TimeoutError};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Substituted when the provider returns no usable candidate text
pub const NO_ANALYSIS_FALLBACK: &str = "No analysis available.";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Missing API key")]
    MissingApiKey,
}

impl From<GeminiServiceError> for ApiError {
    fn from(err: GeminiServiceError) -> Self {
        match err {
            GeminiServiceError::HttpError(_)
            | GeminiServiceError::Timeout(_)
            | GeminiServiceError::MissingApiKey => ApiError::TransportFailure(err.to_string()),
            GeminiServiceError::ApiError { code, message } => ApiError::UpstreamFailure {
                status: Some(code),
                message,
            },
            GeminiServiceError::ParseError(message) => ApiError::UpstreamFailure {
                status: None,
                message,
            },
        }
    }
}

// ============================================================================
// Gemini Service
// ============================================================================

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiService {
    /// Create a new Gemini service from validated settings
    pub fn new(settings: &GeminiSettings) -> Result<Self, GeminiServiceError> {
        if settings.api_key.trim().is_empty() {
            return Err(GeminiServiceError::MissingApiKey);
        }

        let client = Client::builder()
            .connect_timeout(settings.connect_timeout())
            .build()?;

        tracing::info!(
            model = %settings.model,
            base_url = %settings.base_url,
            timeout_seconds = settings.timeout_seconds,
            "Initialized Gemini service"
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            timeout: settings.timeout(),
        })
    }

    /// Model id requests are sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Forward `prompt` as a single-turn request and return the first
    /// candidate's text, or [`NO_ANALYSIS_FALLBACK`] when there is none.
    pub async fn analyze(&self, prompt: &str) -> Result<String, GeminiServiceError> {
        let request = GeminiRequest::single_turn(prompt);
        let response = self.generate_content(&request).await?;

        let text = response
            .first_text()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_ANALYSIS_FALLBACK);

        Ok(text.to_string())
    }

    /// Generate content (non-streaming), bounded by the configured deadline
    pub async fn generate_content(
        &self,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, GeminiServiceError> {
        match with_timeout(self.timeout, self.send(request)).await {
            Ok(response) => Ok(response),
            Err(TimeoutError::Inner(err)) => Err(err),
            Err(TimeoutError::Elapsed(elapsed)) => {
                tracing::error!(
                    model = %self.model,
                    timeout_ms = elapsed.as_millis() as u64,
                    "Gemini request exceeded deadline"
                );
                Err(GeminiServiceError::Timeout(elapsed))
            }
        }
    }

    async fn send(&self, request: &GeminiRequest) -> Result<GeminiResponse, GeminiServiceError> {
        let url = self.endpoint();

        tracing::debug!(
            model = %self.model,
            url = %url,
            "Calling Gemini generateContent API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini request failed");
                GeminiServiceError::HttpError(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body has one
            let message = serde_json::from_str::<GeminiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Gemini API error"
            );

            return Err(GeminiServiceError::ApiError {
                code: status.as_u16(),
                message,
            });
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, body = %response_text, "Failed to parse Gemini response");
            GeminiServiceError::ParseError(e.to_string())
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-2.5-flash-preview-09-2025:generateContent";

    fn service_for(server: &MockServer) -> GeminiService {
        let settings = GeminiSettings::new("test-key").with_base_url(server.uri());
        GeminiService::new(&settings).unwrap()
    }

    fn candidate(text: &str) -> serde_json::Value {
        json!({ "candidates": [ { "content": { "role": "model", "parts": [ { "text": text } ] } } ] })
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = GeminiService::new(&GeminiSettings::new(""));
        assert!(matches!(result, Err(GeminiServiceError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_forwards_prompt_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({ "contents": [ { "parts": [ { "text": "ping" } ] } ] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("pong")))
            .expect(1)
            .mount(&server)
            .await;

        let text = service_for(&server).analyze("ping").await.unwrap();
        assert_eq!(text, "pong");
    }

    #[tokio::test]
    async fn test_no_candidates_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let text = service_for(&server).analyze("ping").await.unwrap();
        assert_eq!(text, NO_ANALYSIS_FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_text_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("")))
            .mount(&server)
            .await;

        let text = service_for(&server).analyze("ping").await.unwrap();
        assert_eq!(text, NO_ANALYSIS_FALLBACK);
    }

    #[tokio::test]
    async fn test_non_success_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
            })))
            .mount(&server)
            .await;

        let err = service_for(&server).analyze("ping").await.unwrap_err();
        match &err {
            GeminiServiceError::ApiError { code, message } => {
                assert_eq!(*code, 403);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(ApiError::from(err).kind(), ErrorKind::UpstreamFailure);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = service_for(&server).analyze("ping").await.unwrap_err();
        assert!(matches!(err, GeminiServiceError::ParseError(_)));
        assert_eq!(ApiError::from(err).kind(), ErrorKind::UpstreamFailure);
    }

    #[tokio::test]
    async fn test_deadline_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate("too late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let settings = GeminiSettings::new("test-key")
            .with_base_url(server.uri())
            .with_timeout(1);
        let service = GeminiService::new(&settings).unwrap();

        let err = service.analyze("ping").await.unwrap_err();
        assert!(matches!(err, GeminiServiceError::Timeout(_)));
        assert_eq!(ApiError::from(err).kind(), ErrorKind::TransportFailure);
    }

    #[tokio::test]
    async fn test_unreachable_is_transport_failure() {
        // Nothing listens on the discard port
        let settings = GeminiSettings::new("test-key").with_base_url("http://127.0.0.1:9");
        let service = GeminiService::new(&settings).unwrap();

        let err = service.analyze("ping").await.unwrap_err();
        assert!(matches!(err, GeminiServiceError::HttpError(_)));
        assert_eq!(ApiError::from(err).kind(), ErrorKind::TransportFailure);
    }
}

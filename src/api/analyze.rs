//! Analysis relay endpoint
//!
//! `POST /api/glauc/analyze` forwards the caller's prompt to Gemini and
//! returns the first candidate's text. Exactly one upstream call is made
//! per well-formed request and none for a missing prompt.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::ApiError;
use crate::schemas::{AnalysisRequest, AnalysisResult};
use crate::server::state::AppState;

/// Relay a prompt to the generative-language provider
///
/// POST /api/glauc/analyze
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    // A body that is not a JSON object with a string prompt has no prompt
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable analysis request");
            AnalysisRequest::default()
        }
    };

    let prompt = request.prompt().ok_or_else(ApiError::prompt_required)?;

    tracing::info!(
        model = %state.gemini.model(),
        prompt_chars = prompt.chars().count(),
        "Forwarding analysis prompt"
    );

    let text = state.gemini.analyze(prompt).await?;

    Ok(Json(AnalysisResult::success(text)))
}

#[cfg(test)]
mod tests {
    use crate::config::{GeminiSettings, Settings};
    use crate::server::{create_router, AppState};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router_for(server: &MockServer) -> Router {
        let settings = Settings {
            gemini: GeminiSettings::new("test-key").with_base_url(server.uri()),
            ..Settings::default()
        };
        create_router(AppState::new(settings).unwrap())
    }

    async fn post_analyze(router: Router, body: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/glauc/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_success_returns_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [ { "content": { "parts": [ { "text": "Your IOP is within range." } ] } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) =
            post_analyze(router_for(&server), r#"{"prompt":"Explain IOP"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "Your IOP is within range." }));
    }

    #[tokio::test]
    async fn test_missing_prompt_makes_no_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        for body in [
            r#"{}"#,
            r#"{"prompt":""}"#,
            r#"{"prompt":null}"#,
            r#"{"prompt":42}"#,
            "not json",
        ] {
            let (status, json_body) = post_analyze(router_for(&server), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json_body, json!({ "error": "Prompt is required" }));
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_is_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
            })))
            .mount(&server)
            .await;

        let (status, body) = post_analyze(router_for(&server), r#"{"prompt":"ping"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to process AI request" }));
    }

    #[tokio::test]
    async fn test_no_candidates_returns_fallback_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let (status, body) = post_analyze(router_for(&server), r#"{"prompt":"ping"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "No analysis available." }));
    }
}

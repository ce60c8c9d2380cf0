//! Relay request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /api/glauc/analyze`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text prompt forwarded to the model
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AnalysisRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }

    /// The prompt, if present and non-empty
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }
}

/// Relay response body: exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Success { result: String },
    Failure { error: String },
}

impl AnalysisResult {
    pub fn success(result: impl Into<String>) -> Self {
        AnalysisResult::Success {
            result: result.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            error: error.into(),
        }
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success { result } => Some(result),
            AnalysisResult::Failure { .. } => None,
        }
    }
}

//! Services module
//!
//! External service integrations.

pub mod gemini;

pub use gemini::{GeminiService, GeminiServiceError, NO_ANALYSIS_FALLBACK};

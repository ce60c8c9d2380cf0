//! Schema module
//!
//! Wire types for the relay's own HTTP surface and for the Gemini REST API.

pub mod analyze;
pub mod gemini;

pub use analyze::{AnalysisRequest, AnalysisResult};

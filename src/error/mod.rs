//! Error types
//!
//! The closed error taxonomy returned by the relay endpoint.

pub mod types;

pub use types::{ApiError, ErrorKind, INTERNAL_ERROR_MESSAGE, PROMPT_REQUIRED_MESSAGE};

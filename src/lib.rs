//! Glauc relay library
//!
//! Backend relay for the Glauc demo site: forwards analysis prompts to the
//! Gemini API and relays the text response, plus a caller-side client with
//! a user-safe fallback.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use client::{RelayClient, RelayClientConfig};
pub use config::Settings;
pub use error::ApiError;
pub use server::App;

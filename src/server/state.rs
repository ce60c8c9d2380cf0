//! Application state container
//!
//! Shared, read-only state handed to every handler via Axum's state
//! extraction. Nothing in it is mutated after startup, so handlers need no
//! locking.

use crate::config::Settings;
use crate::services::GeminiService;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Gemini client used by the analysis endpoint
    pub gemini: Arc<GeminiService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails when the settings are invalid, e.g. the Gemini credential is
    /// missing, so a misconfigured server never starts.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;

        let gemini = GeminiService::new(&settings.gemini)?;

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            settings: Arc::new(settings),
            gemini: Arc::new(gemini),
            start_time: Instant::now(),
        })
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

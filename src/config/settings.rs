//! Application settings and configuration
//!
//! Settings are read once at startup from the process environment (plus an
//! optional `.env` file) and handed to the server as an immutable value.
//! Request handlers never consult the environment themselves.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for biomarker analysis prompts
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Upstream Gemini provider settings
#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    /// Provider credential. Never serialized or printed.
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Model id used for `generateContent`
    pub model: String,

    /// REST base URL (overridable for local stubs)
    pub base_url: String,

    /// Deadline for one outbound call, in seconds
    pub timeout_seconds: u64,

    /// TCP/TLS connect timeout, in seconds
    pub connect_timeout_seconds: u64,
}

impl GeminiSettings {
    /// Settings for the given credential with default model, URL and timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Per-call deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_seconds: 10,
            connect_timeout_seconds: 5,
        }
    }
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Upstream provider
    pub gemini: GeminiSettings,
}

impl Settings {
    /// Load settings from `.env` and the process environment, then validate
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        Self::from_env()
    }

    /// Build settings from the process environment only
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set to the Gemini API credential")?;

        let settings = Self {
            app_name: env_or_default("APP_NAME", "glauc-relay"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "5000")
                .parse()
                .context("Invalid PORT value")?,

            gemini: GeminiSettings {
                api_key,
                model: env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: env_or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                timeout_seconds: env_or_default("GEMINI_TIMEOUT_SECS", "10")
                    .parse()
                    .context("Invalid GEMINI_TIMEOUT_SECS value")?,
                connect_timeout_seconds: env_or_default("GEMINI_CONNECT_TIMEOUT_SECS", "5")
                    .parse()
                    .context("Invalid GEMINI_CONNECT_TIMEOUT_SECS value")?,
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.gemini.api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY must not be empty");
        }

        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("GEMINI_MODEL must not be empty");
        }

        if self.gemini.timeout_seconds == 0 {
            anyhow::bail!("GEMINI_TIMEOUT_SECS must be > 0");
        }

        if self.gemini.connect_timeout_seconds == 0 {
            anyhow::bail!("GEMINI_CONNECT_TIMEOUT_SECS must be > 0");
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "glauc-relay".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            gemini: GeminiSettings::default(),
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

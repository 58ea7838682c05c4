//! Roast service client configuration.

use serde::Deserialize;

/// Base address used when nothing is configured. Matches the service's
/// development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Attempts taking longer than this are aborted and reported as failed.
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Settings injected into the roast API client at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme, host and optional path prefix of the roast service.
    pub base_url: String,
    /// Probe `GET /health` before each roast request.
    pub health_check: bool,
    /// Deadline for a whole attempt, health probe included. `None` waits
    /// indefinitely.
    pub request_timeout_ms: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_check: true,
            request_timeout_ms: Some(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Builds a config from an optional base address, typically a build-time
    /// environment variable. Blank values fall back to [`DEFAULT_BASE_URL`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(base) => Self {
                base_url: base.trim_end_matches('/').to_string(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn with_health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Joins the base address and `path` with exactly one `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

use std::env;

pub const DEFAULT_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_URL.to_string(), timeout_ms: None }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("OSRSNAV_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let timeout_ms = env::var("OSRSNAV_TIMEOUT_MS").ok().and_then(|s| s.parse::<u64>().ok());
        Self { base_url, timeout_ms }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

//! Settings for talking to the expense service and the local cache.

use std::time::Duration;

/// The base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
/// The cache database path used when none is configured.
pub const DEFAULT_CACHE_PATH: &str = "expenses_cache.db";
/// How long to wait for the expense service before giving up.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The configuration for the expense client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// The base URL of the REST service, e.g. "http://127.0.0.1:5000".
    pub api_url: String,
    /// The file path of the SQLite database used as the local cache.
    pub cache_path: String,
    /// The timeout for each request to the REST service.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config, ignoring any trailing slashes on `api_url`.
    pub fn new(api_url: &str, cache_path: &str, request_timeout: Duration) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            cache_path: cache_path.to_owned(),
            request_timeout,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_CACHE_PATH, DEFAULT_REQUEST_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ClientConfig;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("http://localhost:5000//", "cache.db", Duration::ZERO);

        assert_eq!(config.api_url, "http://localhost:5000");
    }
}

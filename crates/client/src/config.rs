use std::time::Duration;

/// Default API base path (the dev server proxies `/api` to this address).
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Client configuration loaded from environment variables.
///
/// Every field has a default suitable for a local backend. Values that
/// fail to parse fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, including the `/api` path.
    pub api_url: String,
    /// Per-request timeout. A request exceeding it fails.
    pub timeout: Duration,
    /// Extra attempts for idempotent requests after a transient failure.
    pub retries: u32,
    /// Interval for live resources (run counters, run history).
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HNTR_API_URL`            | `http://localhost:8080/api` |
    /// | `HNTR_TIMEOUT_SECS`       | `30`                        |
    /// | `HNTR_RETRIES`            | `3`                         |
    /// | `HNTR_POLL_INTERVAL_SECS` | `10`                        |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("HNTR_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = lookup("HNTR_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries: u32 = lookup("HNTR_RETRIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRIES);

        let poll_interval_secs: u64 = lookup("HNTR_POLL_INTERVAL_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            retries,
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }
}

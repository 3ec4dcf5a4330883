use std::time::Duration;

use recipe_cache_core::{
    DEFAULT_UPSTREAM_BASE_URL, DEFAULT_UPSTREAM_MAX_RETRIES, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};

/// Connection settings for the upstream recipe provider.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after the first one for transient failures
    pub max_retries: usize,
    /// Delay before the first retry, doubled on each further attempt
    pub retry_base_delay: Duration,
}

impl UpstreamConfig {
    /// Defaults for everything except the api key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            max_retries: DEFAULT_UPSTREAM_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(500),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub const fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

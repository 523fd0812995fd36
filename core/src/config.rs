//! Connection settings consumed by `HttpTransport`.

use std::time::Duration;

pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Fixed settings for one transport instance. Nothing here changes between
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: String,
    /// Base URL used instead of the region-derived host, e.g. a local mock.
    pub endpoint_override: Option<String>,
    pub timeout: Option<Duration>,
    /// Sent on every request. Credentials providers inject auth headers here.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_override: None,
            timeout: None,
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Read `GS2_REGION`, `GS2_TIMER_ENDPOINT` and `GS2_TIMEOUT_SECS`.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(region) = lookup("GS2_REGION").filter(|r| !r.is_empty()) {
            config.region = region;
        }
        config.endpoint_override = lookup("GS2_TIMER_ENDPOINT").filter(|e| !e.is_empty());
        config.timeout = lookup("GS2_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        config
    }

    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.endpoint_override = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Base URL for an endpoint group, without a trailing slash.
    pub fn base_url(&self, endpoint: &str) -> String {
        match &self.endpoint_override {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{endpoint}.{}.gs2io.com", self.region),
        }
    }
}

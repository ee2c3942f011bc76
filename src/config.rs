//! Gateway configuration types.
//!
//! `HttpConfig` controls the underlying `reqwest::Client`; `GatewayConfig`
//! adds where the API lives and where the bearer token is stored.

use crate::defaults;
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout
    #[serde(with = "duration_option_serde")]
    pub timeout: Option<Duration>,
    /// Connection timeout
    #[serde(with = "duration_option_serde")]
    pub connect_timeout: Option<Duration>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
    /// Proxy settings
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
}

impl HttpConfig {
    /// Returns a builder for constructing `HttpConfig`
    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder::new()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(defaults::http::USER_AGENT.to_string()),
        }
    }
}

/// Builder for `HttpConfig`
#[derive(Debug, Clone, Default)]
pub struct HttpConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    headers: HashMap<String, String>,
    proxy: Option<String>,
    user_agent: Option<String>,
}

impl HttpConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
    pub fn proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Build the configuration. Unset values fall back to [`HttpConfig::default`].
    pub fn build(self) -> HttpConfig {
        let defaults = HttpConfig::default();
        HttpConfig {
            timeout: self.timeout.or(defaults.timeout),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            headers: self.headers,
            proxy: self.proxy,
            user_agent: self.user_agent.or(defaults.user_agent),
        }
    }
}

/// Where the gallery API lives and how to authenticate against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API root every endpoint path is appended to (no trailing slash).
    pub base_url: String,
    /// Key the bearer token is stored under.
    pub token_key: String,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::api::BASE_URL.to_string(),
            token_key: defaults::api::TOKEN_KEY.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `GALLERY_API_BASE_URL`, `GALLERY_TOKEN_KEY` and
    /// `GALLERY_HTTP_TIMEOUT_SECS`; anything unset keeps its default.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(base_url) = lookup(defaults::env::BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(token_key) = lookup(defaults::env::TOKEN_KEY) {
            builder = builder.token_key(token_key);
        }
        if let Some(raw) = lookup(defaults::env::HTTP_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                GatewayError::ConfigurationError(format!(
                    "Invalid {}='{raw}': {e}",
                    defaults::env::HTTP_TIMEOUT_SECS
                ))
            })?;
            builder = builder.http(HttpConfig::builder().timeout(Duration::from_secs(secs)).build());
        }
        builder.build()
    }
}

/// Builder for `GatewayConfig`
#[derive(Debug, Clone, Default)]
pub struct GatewayConfigBuilder {
    base_url: Option<String>,
    token_key: Option<String>,
    http: Option<HttpConfig>,
}

impl GatewayConfigBuilder {
    /// Set the API root (e.g., "<https://gallery.example.com/api>")
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn token_key<S: Into<String>>(mut self, key: S) -> Self {
        self.token_key = Some(key.into());
        self
    }

    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<GatewayConfig, GatewayError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| defaults::api::BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GatewayError::ConfigurationError(format!(
                "Base URL must be absolute http(s), got '{base_url}'"
            )));
        }

        let token_key = self
            .token_key
            .unwrap_or_else(|| defaults::api::TOKEN_KEY.to_string());
        if token_key.is_empty() {
            return Err(GatewayError::ConfigurationError(
                "Token key cannot be empty".to_string(),
            ));
        }

        Ok(GatewayConfig {
            base_url,
            token_key,
            http: self.http.unwrap_or_default(),
        })
    }
}

// Helper module for Duration serialization
mod duration_option_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => d.as_secs().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Option<u64> = Option::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_trims_trailing_slash() {
        let config = GatewayConfig::builder()
            .base_url("https://gallery.example.com/api/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "https://gallery.example.com/api");
        assert_eq!(config.token_key, "token");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = GatewayConfig::builder().base_url("/api").build().unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationError(_)));
    }

    #[test]
    fn empty_token_key_is_rejected() {
        let err = GatewayConfig::builder().token_key("").build().unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationError(_)));
    }

    #[test]
    fn http_builder_falls_back_to_defaults() {
        let http = HttpConfig::builder().header("X-Client", "cli").build();
        assert_eq!(http.timeout, Some(defaults::http::REQUEST_TIMEOUT));
        assert_eq!(http.user_agent.as_deref(), Some(defaults::http::USER_AGENT));
        assert_eq!(http.headers.get("X-Client").map(String::as_str), Some("cli"));
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "GALLERY_API_BASE_URL" => Some("http://10.0.0.5:8080/api".to_string()),
            "GALLERY_TOKEN_KEY" => Some("session".to_string()),
            "GALLERY_HTTP_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8080/api");
        assert_eq!(config.token_key, "session");
        assert_eq!(config.http.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn from_lookup_with_nothing_set_uses_defaults() {
        let config = GatewayConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, defaults::api::BASE_URL);
        assert_eq!(config.token_key, defaults::api::TOKEN_KEY);
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = GatewayConfig::from_lookup(|key| {
            (key == "GALLERY_HTTP_TIMEOUT_SECS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationError(ref m) if m.contains("soon")));
    }

    #[test]
    fn http_config_serializes_timeouts_as_seconds() {
        let json = serde_json::to_value(HttpConfig::default()).unwrap();
        assert_eq!(json["timeout"], 30);
        assert_eq!(json["connect_timeout"], 10);
    }
}

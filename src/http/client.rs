//! HTTP client builder utilities

use crate::config::HttpConfig;
use crate::error::GatewayError;

/// Build a `reqwest::Client` from [`HttpConfig`].
///
/// Extra headers from the config are not installed as client defaults; the
/// gateway adds them per request so they sit next to `Content-Type`.
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, GatewayError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| GatewayError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| GatewayError::HttpError(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client_default() {
        let config = HttpConfig::default();
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let config = HttpConfig {
            timeout: Some(Duration::from_secs(5)),
            connect_timeout: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_proxy() {
        let config = HttpConfig {
            proxy: Some("http://proxy.example.com:8080".to_string()),
            ..Default::default()
        };
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_invalid_proxy() {
        let config = HttpConfig {
            proxy: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationError(_)));
    }
}

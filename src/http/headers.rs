//! HTTP Headers Utility

use crate::error::GatewayError;
use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use std::collections::HashMap;

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, GatewayError> {
        self.headers.insert(AUTHORIZATION, bearer_value(token)?);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(self) -> Self {
        self.with_content_type(APPLICATION_JSON)
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self
    }

    /// Add user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, GatewayError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid user agent: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, GatewayError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                GatewayError::ConfigurationError(format!("Invalid header value for '{key}': {e}"))
            })?;
            self.headers.insert(header_name, header_value);
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `Bearer <token>` as a sensitive header value.
pub fn bearer_value(token: &str) -> Result<HeaderValue, GatewayError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
        GatewayError::ConfigurationError(format!("Invalid bearer token format: {e}"))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

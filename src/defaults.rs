//! Default Configuration Values
//!
//! Centralizes the defaults used by the gateway so they can be adjusted in
//! one place.

use std::time::Duration;

/// Backend endpoint defaults
pub mod api {
    /// Default API root. The backend mounts every route under `/api` and
    /// listens on port 5235 unless told otherwise.
    pub const BASE_URL: &str = "http://localhost:5235/api";

    /// Key under which the bearer token lives in the token store
    pub const TOKEN_KEY: &str = "token";
}

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("gallery-gateway/", env!("CARGO_PKG_VERSION"));
}

/// Environment variables read by [`crate::config::GatewayConfig::from_env`]
pub mod env {
    pub const BASE_URL: &str = "GALLERY_API_BASE_URL";
    pub const TOKEN_KEY: &str = "GALLERY_TOKEN_KEY";
    pub const HTTP_TIMEOUT_SECS: &str = "GALLERY_HTTP_TIMEOUT_SECS";
}

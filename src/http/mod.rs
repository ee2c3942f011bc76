//! HTTP Utilities
//!
//! - HTTP client construction
//! - Header management
//! - HTTP interceptors
//! - Query parameter filtering

pub mod client;
pub mod headers;
pub mod interceptor;
pub mod params;

pub use client::build_http_client_from_config;
pub use headers::HttpHeaderBuilder;
pub use interceptor::{
    BearerAuthInterceptor, HttpInterceptor, HttpRequestContext, LoggingInterceptor,
};
pub use params::{QueryParams, filter_params};

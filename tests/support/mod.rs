//! Shared helpers for mock-server tests.
#![allow(dead_code)]

use gallery_gateway::prelude::*;
use std::sync::Arc;
use wiremock::{Match, MockServer, Request};

/// API root on the mock server, mirroring the backend's `/api` mount.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Client without credentials pointed at the mock server.
pub fn anonymous_client(server: &MockServer) -> GalleryClient {
    GalleryClient::builder()
        .base_url(api_base(server))
        .build()
        .expect("client builds")
}

/// Client with a fixed bearer token pointed at the mock server.
pub fn client_with_token(server: &MockServer, token: &str) -> GalleryClient {
    GalleryClient::builder()
        .base_url(api_base(server))
        .token(token)
        .build()
        .expect("client builds")
}

/// Client reading its token from `store` on every request.
pub fn client_with_store(server: &MockServer, store: Arc<dyn KeyValueStore>) -> GalleryClient {
    GalleryClient::builder()
        .base_url(api_base(server))
        .token_store(store)
        .build()
        .expect("client builds")
}

/// Matches requests that carry no `Authorization` header at all.
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

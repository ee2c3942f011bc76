//! HTTP Interceptor interfaces
//!
//! Interceptors observe and tweak outgoing requests. The client holds an
//! explicit, ordered list of them and runs every one before each send;
//! nothing is registered globally.

use crate::auth::{TokenProvider, mask_token};
use crate::error::GatewayError;
use crate::http::headers::HttpHeaderBuilder;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub method: reqwest::Method,
    /// Endpoint path relative to the API root, e.g. `/images/42`.
    pub path: String,
    /// Fully resolved URL without the query string.
    pub url: String,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified)
    /// builder, or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, GatewayError> {
        Ok(builder)
    }

    /// Called after a successful (2xx) response is received.
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    /// Called when sending fails or the backend answers with an error status.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &GatewayError) {}
}

/// Attaches `Authorization: Bearer <token>` when the provider has a token.
///
/// The provider is consulted on every request; when it has no token (or an
/// empty one) the request goes out unauthenticated.
pub struct BearerAuthInterceptor {
    provider: Arc<dyn TokenProvider>,
}

impl BearerAuthInterceptor {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }
}

impl HttpInterceptor for BearerAuthInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, GatewayError> {
        let token = self
            .provider
            .current_token()?
            .filter(|token| !token.expose_secret().is_empty());
        match token {
            Some(token) => {
                let token = token.expose_secret();
                tracing::debug!(target: "gallery_gateway::http", path=%ctx.path, token=%mask_token(token), "attaching bearer token");
                let headers = HttpHeaderBuilder::new().with_bearer_auth(token)?.build();
                Ok(builder.headers(headers))
            }
            None => {
                tracing::debug!(target: "gallery_gateway::http", path=%ctx.path, "no token stored, sending unauthenticated");
                Ok(builder)
            }
        }
    }
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, GatewayError> {
        tracing::debug!(target: "gallery_gateway::http", method=%ctx.method, url=%ctx.url, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), GatewayError> {
        tracing::debug!(target: "gallery_gateway::http", method=%ctx.method, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &GatewayError) {
        tracing::debug!(target: "gallery_gateway::http", method=%ctx.method, url=%ctx.url, err=%error, "request error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryStore, StaticTokenProvider, StoreTokenProvider, store::KeyValueStore};
    use reqwest::header::AUTHORIZATION;
    use secrecy::SecretString;
    use tracing_test::traced_test;

    fn ctx() -> HttpRequestContext {
        HttpRequestContext {
            method: reqwest::Method::GET,
            path: "/users/me".to_string(),
            url: "http://localhost:5235/api/users/me".to_string(),
        }
    }

    fn intercepted(interceptor: &dyn HttpInterceptor) -> reqwest::Request {
        let builder = reqwest::Client::new().get(ctx().url);
        interceptor
            .on_before_send(&ctx(), builder)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn bearer_interceptor_sets_header_from_provider() {
        let interceptor =
            BearerAuthInterceptor::new(Arc::new(StaticTokenProvider::new("abc.def.ghi")));
        let request = intercepted(&interceptor);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn bearer_interceptor_leaves_headers_alone_without_token() {
        let store = Arc::new(MemoryStore::new());
        let interceptor = BearerAuthInterceptor::new(Arc::new(StoreTokenProvider::new(
            store.clone(),
            "token",
        )));
        let request = intercepted(&interceptor);
        assert!(request.headers().get(AUTHORIZATION).is_none());

        store.set_item("token", "now-logged-in").unwrap();
        let request = intercepted(&interceptor);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer now-logged-in"
        );
    }

    struct BlankProvider;

    impl TokenProvider for BlankProvider {
        fn current_token(&self) -> Result<Option<SecretString>, GatewayError> {
            Ok(Some(SecretString::from(String::new())))
        }
    }

    #[test]
    fn bearer_interceptor_skips_empty_token_from_any_provider() {
        let request = intercepted(&BearerAuthInterceptor::new(Arc::new(BlankProvider)));
        assert!(request.headers().get(AUTHORIZATION).is_none());

        let request = intercepted(&BearerAuthInterceptor::new(Arc::new(
            StaticTokenProvider::new(""),
        )));
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let interceptor = BearerAuthInterceptor::new(Arc::new(StaticTokenProvider::new("abc")));
        let request = intercepted(&interceptor);
        assert!(request.headers().get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    #[traced_test]
    fn bearer_interceptor_logs_masked_token_only() {
        let interceptor = BearerAuthInterceptor::new(Arc::new(StaticTokenProvider::new(
            "supersecretvalue1234",
        )));
        intercepted(&interceptor);
        assert!(logs_contain("attaching bearer token"));
        assert!(logs_contain("supe...1234"));
        assert!(!logs_contain("supersecretvalue1234"));
    }

    #[test]
    #[traced_test]
    fn logging_interceptor_reports_errors() {
        LoggingInterceptor.on_error(&ctx(), &GatewayError::api_error(404, "missing"));
        assert!(logs_contain("request error"));
        assert!(logs_contain("404"));
    }
}

//! Gallery API client.
//!
//! [`GalleryClient`] is the single gateway to the backend. Every endpoint
//! method in [`crate::api`] goes through [`GalleryClient::execute`]:
//!
//! 1. resolve the URL against the configured API root,
//! 2. build base headers (`Content-Type`, user agent, configured extras),
//! 3. run the interceptors in order (bearer auth first when configured),
//! 4. send once,
//! 5. map non-2xx to [`GatewayError::ApiError`], otherwise return the body.
//!
//! # Example
//!
//! ```rust,no_run
//! use gallery_gateway::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), GatewayError> {
//! let store = Arc::new(FileStore::new("storage.json"));
//! let client = GalleryClient::builder()
//!     .base_url("https://gallery.example.com/api")
//!     .token_store(store)
//!     .build()?;
//!
//! let page = client.get_images(ImageQuery::new().tag("cat").limit(20)).await?;
//! println!("{page}");
//! # Ok(())
//! # }
//! ```

use crate::auth::{KeyValueStore, StaticTokenProvider, StoreTokenProvider, TokenProvider};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::headers::{FORM_URLENCODED, HttpHeaderBuilder};
use crate::http::{
    BearerAuthInterceptor, HttpInterceptor, HttpRequestContext, LoggingInterceptor, QueryParams,
    build_http_client_from_config,
};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Request body shapes the backend accepts.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`, only used for the token endpoint.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, GatewayError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

/// A successful response before JSON decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Authenticated HTTP gateway to the gallery backend.
#[derive(Clone)]
pub struct GalleryClient {
    config: Arc<GatewayConfig>,
    http_client: reqwest::Client,
    interceptors: Arc<Vec<Arc<dyn HttpInterceptor>>>,
}

impl std::fmt::Debug for GalleryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryClient")
            .field("base_url", &self.config.base_url)
            .field("token_key", &self.config.token_key)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl GalleryClient {
    pub fn builder() -> GalleryClientBuilder {
        GalleryClientBuilder::new()
    }

    /// Client without credentials; every request is sent unauthenticated.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full URL for an endpoint path such as `/images/42`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<serde_json::Value, GatewayError> {
        self.execute(Method::GET, path, query, RequestBody::Empty)
            .await
    }

    pub(crate) async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<serde_json::Value, GatewayError> {
        self.execute(Method::POST, path, None, RequestBody::json(body)?)
            .await
    }

    pub(crate) async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<serde_json::Value, GatewayError> {
        self.execute(Method::PUT, path, None, RequestBody::json(body)?)
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<serde_json::Value, GatewayError> {
        self.execute(Method::DELETE, path, None, RequestBody::Empty)
            .await
    }

    /// Issue one request and return the response body parsed as JSON.
    ///
    /// An empty 2xx body yields `Value::Null`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<QueryParams>,
        body: RequestBody,
    ) -> Result<serde_json::Value, GatewayError> {
        let raw = self.execute_raw(method, path, query, body).await?;
        if raw.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&raw.body).map_err(|e| {
            GatewayError::ParseError(format!("Invalid JSON in response from {path}: {e}"))
        })
    }

    /// Issue one request and return the undecoded response.
    pub async fn execute_raw(
        &self,
        method: Method,
        path: &str,
        query: Option<QueryParams>,
        body: RequestBody,
    ) -> Result<RawResponse, GatewayError> {
        let ctx = HttpRequestContext {
            method: method.clone(),
            path: path.to_string(),
            url: self.endpoint(path),
        };

        let headers = self.base_headers(&body)?;
        let mut builder = self.http_client.request(method, &ctx.url).headers(headers);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(&query.to_pairs());
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.json(&json),
            RequestBody::Form(pairs) => builder.form(&pairs),
        };

        for interceptor in self.interceptors.iter() {
            builder = match interceptor.on_before_send(&ctx, builder) {
                Ok(builder) => builder,
                Err(e) => return Err(self.report(&ctx, e)),
            };
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.report(&ctx, GatewayError::HttpError(e.to_string()))),
        };

        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    return Err(self.report(
                        &ctx,
                        GatewayError::HttpError(format!(
                            "Failed to read error body (status {status}): {e}"
                        )),
                    ));
                }
            };
            return Err(self.report(&ctx, GatewayError::api_error(status.as_u16(), text)));
        }

        for interceptor in self.interceptors.iter() {
            if let Err(e) = interceptor.on_response(&ctx, &response) {
                return Err(self.report(&ctx, e));
            }
        }

        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|e| {
            self.report(
                &ctx,
                GatewayError::HttpError(format!("Failed to read response body: {e}")),
            )
        })?;
        Ok(RawResponse {
            status,
            headers,
            body: bytes.to_vec(),
        })
    }

    fn base_headers(&self, body: &RequestBody) -> Result<HeaderMap, GatewayError> {
        let mut builder = HttpHeaderBuilder::new().with_json_content_type();
        if matches!(body, RequestBody::Form(_)) {
            builder = builder.with_content_type(FORM_URLENCODED);
        }
        if let Some(user_agent) = &self.config.http.user_agent {
            builder = builder.with_user_agent(user_agent)?;
        }
        Ok(builder
            .with_custom_headers(&self.config.http.headers)?
            .build())
    }

    fn report(&self, ctx: &HttpRequestContext, error: GatewayError) -> GatewayError {
        for interceptor in self.interceptors.iter() {
            interceptor.on_error(ctx, &error);
        }
        error
    }
}

/// Builder for [`GalleryClient`].
pub struct GalleryClientBuilder {
    config: GatewayConfig,
    base_url: Option<String>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    token_store: Option<Arc<dyn KeyValueStore>>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_client: Option<reqwest::Client>,
    logging: bool,
}

impl Default for GalleryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryClientBuilder {
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
            base_url: None,
            token_provider: None,
            token_store: None,
            interceptors: Vec::new(),
            http_client: None,
            logging: true,
        }
    }

    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the API root from the config.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Supply the credential provider consulted before every request.
    /// Takes precedence over [`GalleryClientBuilder::token_store`].
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Read the token from `store` under the configured token key.
    pub fn token_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Use a fixed token.
    pub fn token<S: Into<String>>(self, token: S) -> Self {
        self.token_provider(Arc::new(StaticTokenProvider::new(token)))
    }

    /// Append an interceptor. Interceptors run in the order they are added,
    /// after bearer auth and logging.
    pub fn interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Enable or disable the built-in [`LoggingInterceptor`] (on by default).
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Use a prebuilt `reqwest::Client` instead of building one from
    /// `HttpConfig`. Timeouts and proxy settings in the config are then
    /// ignored; headers and user agent still apply per request.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<GalleryClient, GatewayError> {
        let config = match self.base_url {
            Some(url) => GatewayConfig::builder()
                .base_url(url)
                .token_key(self.config.token_key)
                .http(self.config.http)
                .build()?,
            None => self.config,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client_from_config(&config.http)?,
        };

        let provider = self.token_provider.or_else(|| {
            self.token_store.map(|store| {
                Arc::new(StoreTokenProvider::new(store, config.token_key.clone()))
                    as Arc<dyn TokenProvider>
            })
        });

        let mut interceptors: Vec<Arc<dyn HttpInterceptor>> = Vec::new();
        if let Some(provider) = provider {
            interceptors.push(Arc::new(BearerAuthInterceptor::new(provider)));
        }
        if self.logging {
            interceptors.push(Arc::new(LoggingInterceptor));
        }
        interceptors.extend(self.interceptors);

        tracing::debug!(target: "gallery_gateway::http", base_url=%config.base_url, interceptors=interceptors.len(), "gallery client ready");

        Ok(GalleryClient {
            config: Arc::new(config),
            http_client,
            interceptors: Arc::new(interceptors),
        })
    }
}

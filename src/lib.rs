//! # gallery-gateway
//!
//! Authenticated HTTP client for the image gallery REST API: images, API
//! keys and users.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **One method per endpoint**: every method issues exactly one request and
//!   returns the backend's JSON body unmodified.
//! - **Injected credentials**: a [`auth::TokenProvider`] is consulted before
//!   every request; when it has a token the request carries
//!   `Authorization: Bearer <token>`, otherwise it goes out unauthenticated.
//! - **Explicit interceptors**: an ordered list of [`http::HttpInterceptor`]s
//!   runs before each send; nothing is registered globally.
//! - **Parameter filtering**: null and empty query values are dropped before
//!   they reach the backend.
//! - **Errors surface as-is**: non-2xx responses become
//!   [`GatewayError::ApiError`] with status and body intact.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gallery_gateway::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GatewayError> {
//!     let store = Arc::new(MemoryStore::new());
//!     let client = GalleryClient::builder()
//!         .config(GatewayConfig::from_env()?)
//!         .token_store(store.clone())
//!         .build()?;
//!
//!     let token: TokenResponse =
//!         serde_json::from_value(client.login("alice", "hunter2").await?)?;
//!     store.set_item("token", &token.access_token)?;
//!
//!     let me: User = serde_json::from_value(client.get_current_user().await?)?;
//!     println!("logged in as {}", me.username);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod http;
pub mod types;

pub use client::{GalleryClient, GalleryClientBuilder};
pub use error::GatewayError;

/// Commonly used types
pub mod prelude {
    pub use crate::auth::{
        FileStore, KeyValueStore, MemoryStore, StaticTokenProvider, StoreTokenProvider,
        TokenProvider,
    };
    pub use crate::client::{GalleryClient, GalleryClientBuilder, RequestBody};
    pub use crate::config::{GatewayConfig, HttpConfig};
    pub use crate::error::GatewayError;
    pub use crate::http::{HttpInterceptor, HttpRequestContext, QueryParams, filter_params};
    pub use crate::types::*;
}

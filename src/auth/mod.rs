//! Authentication helpers and token providers.
//!
//! The gateway asks a [`TokenProvider`] for the current bearer token before
//! every request and never caches the answer, so logging in or out takes
//! effect on the very next call.

pub mod store;

use crate::error::GatewayError;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// A synchronous Bearer token provider.
///
/// `Ok(None)` means "no token": the request is sent unauthenticated and the
/// backend decides whether that is acceptable.
pub trait TokenProvider: Send + Sync {
    fn current_token(&self) -> Result<Option<SecretString>, GatewayError>;
}

/// A fixed token, for scripts and tests where the token is managed
/// externally. An empty token means "no token".
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn current_token(&self) -> Result<Option<SecretString>, GatewayError> {
        let token = self.token.expose_secret();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecretString::from(token.to_owned())))
    }
}

/// Reads the token from a [`KeyValueStore`] under a fixed key.
///
/// Empty strings are treated as "no token".
pub struct StoreTokenProvider {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl StoreTokenProvider {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TokenProvider for StoreTokenProvider {
    fn current_token(&self) -> Result<Option<SecretString>, GatewayError> {
        Ok(self
            .store
            .get_item(&self.key)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }
}

/// Shorten a token for logging: first and last four characters only.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exposed(provider: &dyn TokenProvider) -> Option<String> {
        provider
            .current_token()
            .unwrap()
            .map(|t| t.expose_secret().to_string())
    }

    #[test]
    fn static_provider_always_returns_token() {
        let provider = StaticTokenProvider::new("fixed");
        assert_eq!(exposed(&provider).as_deref(), Some("fixed"));
        assert_eq!(exposed(&provider).as_deref(), Some("fixed"));
    }

    #[test]
    fn static_provider_treats_empty_as_absent() {
        assert_eq!(exposed(&StaticTokenProvider::new("")), None);
    }

    #[test]
    fn store_provider_reads_fresh_on_every_call() {
        let store = Arc::new(MemoryStore::new());
        let provider = StoreTokenProvider::new(store.clone(), "token");
        assert_eq!(exposed(&provider), None);

        store.set_item("token", "first").unwrap();
        assert_eq!(exposed(&provider).as_deref(), Some("first"));

        store.set_item("token", "second").unwrap();
        assert_eq!(exposed(&provider).as_deref(), Some("second"));

        store.remove_item("token").unwrap();
        assert_eq!(exposed(&provider), None);
    }

    #[test]
    fn store_provider_treats_empty_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("token", "").unwrap();
        let provider = StoreTokenProvider::new(store, "token");
        assert_eq!(exposed(&provider), None);
    }

    #[test]
    fn store_provider_uses_its_key() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("token", "wrong").unwrap();
        store.set_item("session", "right").unwrap();
        let provider = StoreTokenProvider::new(store, "session");
        assert_eq!(provider.key(), "session");
        assert_eq!(exposed(&provider).as_deref(), Some("right"));
    }

    #[test]
    fn mask_token_hides_middle() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh...load");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}

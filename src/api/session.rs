//! Token endpoint.

use crate::client::{GalleryClient, RequestBody};
use crate::error::GatewayError;
use reqwest::Method;
use serde_json::Value;

impl GalleryClient {
    /// `POST /token` with an OAuth2 password form.
    ///
    /// Returns `{access_token, token_type}` as sent by the backend. The
    /// token is not stored; write it to the token store to authenticate
    /// subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, GatewayError> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        self.execute(Method::POST, "/token", None, RequestBody::Form(form))
            .await
    }
}

//! API key endpoints.

use crate::client::GalleryClient;
use crate::error::GatewayError;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

impl GalleryClient {
    /// `GET /keys/`
    pub async fn get_api_keys(&self) -> Result<Value, GatewayError> {
        self.get("/keys/", None).await
    }

    /// `POST /keys/`
    pub async fn add_api_key<T: Serialize + ?Sized>(
        &self,
        key_data: &T,
    ) -> Result<Value, GatewayError> {
        self.post("/keys/", key_data).await
    }

    /// `DELETE /keys/{id}`
    pub async fn delete_api_key(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.delete(&format!("/keys/{id}")).await
    }
}

//! User endpoints.

use crate::client::GalleryClient;
use crate::error::GatewayError;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

impl GalleryClient {
    /// `GET /users/`
    pub async fn get_users(&self) -> Result<Value, GatewayError> {
        self.get("/users/", None).await
    }

    /// `POST /users/`. Does not require a token.
    pub async fn register_user<T: Serialize + ?Sized>(
        &self,
        user_data: &T,
    ) -> Result<Value, GatewayError> {
        self.post("/users/", user_data).await
    }

    /// `DELETE /users/{user_id}`
    pub async fn delete_user(&self, user_id: impl Display) -> Result<Value, GatewayError> {
        self.delete(&format!("/users/{user_id}")).await
    }

    /// `GET /users/me`
    pub async fn get_current_user(&self) -> Result<Value, GatewayError> {
        self.get("/users/me", None).await
    }

    /// `PUT /users/me`
    pub async fn update_current_user<T: Serialize + ?Sized>(
        &self,
        user_data: &T,
    ) -> Result<Value, GatewayError> {
        self.put("/users/me", user_data).await
    }
}

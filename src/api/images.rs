//! Image endpoints.

use crate::client::{GalleryClient, RequestBody};
use crate::error::GatewayError;
use crate::http::QueryParams;
use crate::types::ImagePayload;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

#[derive(Serialize)]
struct TagsBody<'a, T: ?Sized> {
    tags: &'a T,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    filename: &'a str,
}

#[derive(Serialize)]
struct BulkIdsBody<'a, I, T: ?Sized> {
    image_ids: &'a [I],
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a T>,
}

impl GalleryClient {
    /// `GET /images/` with null and empty filters dropped.
    ///
    /// Accepts raw [`QueryParams`] or an [`crate::types::ImageQuery`].
    pub async fn get_images(&self, params: impl Into<QueryParams>) -> Result<Value, GatewayError> {
        let params = params.into().filtered();
        self.get("/images/", Some(params)).await
    }

    /// `POST /images/`
    pub async fn add_image<T: Serialize + ?Sized>(
        &self,
        image_data: &T,
    ) -> Result<Value, GatewayError> {
        self.post("/images/", image_data).await
    }

    /// `POST /images/bulk`
    pub async fn add_bulk_images<T: Serialize + ?Sized>(
        &self,
        bulk_data: &T,
    ) -> Result<Value, GatewayError> {
        self.post("/images/bulk", bulk_data).await
    }

    /// `PUT /images/{id}/tags`, replacing the image's tags.
    pub async fn update_image_tags<T: Serialize + ?Sized>(
        &self,
        id: impl Display,
        tags: &T,
    ) -> Result<Value, GatewayError> {
        self.put(&format!("/images/{id}/tags"), &TagsBody { tags })
            .await
    }

    /// `PUT /images/{image_id}/rename`
    pub async fn rename_image(
        &self,
        image_id: impl Display,
        new_filename: &str,
    ) -> Result<Value, GatewayError> {
        self.put(
            &format!("/images/{image_id}/rename"),
            &RenameBody {
                filename: new_filename,
            },
        )
        .await
    }

    /// `DELETE /images/{id}`
    pub async fn delete_image(&self, id: impl Display) -> Result<Value, GatewayError> {
        self.delete(&format!("/images/{id}")).await
    }

    /// `POST /images/bulk-delete`
    pub async fn delete_images_bulk<I: Serialize>(
        &self,
        image_ids: &[I],
    ) -> Result<Value, GatewayError> {
        let body = BulkIdsBody::<I, ()> {
            image_ids,
            tags: None,
        };
        self.post("/images/bulk-delete", &body).await
    }

    /// `POST /images/bulk-add-tags`
    pub async fn add_tags_to_images_bulk<I: Serialize, T: Serialize + ?Sized>(
        &self,
        image_ids: &[I],
        tags: &T,
    ) -> Result<Value, GatewayError> {
        let body = BulkIdsBody {
            image_ids,
            tags: Some(tags),
        };
        self.post("/images/bulk-add-tags", &body).await
    }

    /// `GET /random/`, optionally restricted to one tag. Returns `{url}`.
    pub async fn get_random_image(&self, tag: Option<&str>) -> Result<Value, GatewayError> {
        let params = QueryParams::new().insert_opt("tag", tag).filtered();
        self.get("/random/", Some(params)).await
    }

    /// `GET /v1/random/{key}`: the image bytes selected by an API key.
    pub async fn get_random_image_by_key(&self, key: &str) -> Result<ImagePayload, GatewayError> {
        let raw = self
            .execute_raw(
                Method::GET,
                &format!("/v1/random/{key}"),
                None,
                RequestBody::Empty,
            )
            .await?;
        let content_type = raw
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(ImagePayload {
            content_type,
            bytes: raw.body,
        })
    }
}

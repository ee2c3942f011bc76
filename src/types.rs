//! Records exchanged with the gallery backend.
//!
//! Endpoint methods return the backend's JSON untouched; these types are for
//! callers who want to build request bodies or decode responses with
//! `serde_json::from_value`.

use crate::http::QueryParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ImageId = i64;
pub type UserId = i64;
pub type ApiKeyId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub filetype: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// One page of `GET /images/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedImages {
    pub total: u64,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: ApiKeyId,
    pub key: String,
    pub name: String,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
    pub owner_id: UserId,
    #[serde(default)]
    pub tags_and: Vec<Tag>,
    #[serde(default)]
    pub tags_or: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body of `POST /images/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCreate {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl ImageCreate {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Body of `POST /images/bulk`: the same tags are applied to every URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBulkCreate {
    pub urls: Vec<String>,
    pub tags: Vec<String>,
}

/// Result of `POST /images/bulk-delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    pub status: String,
    pub deleted_ids: Vec<ImageId>,
}

/// Body of `POST /keys/`.
///
/// A key serves random images carrying all of `tags_and` and at least one of
/// `tags_or`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyCreate {
    pub name: String,
    pub tags_and: Vec<String>,
    pub tags_or: Vec<String>,
}

/// Body of `POST /users/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

/// Body of `PUT /users/me`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response of `POST /token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Response of `GET /random/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomImage {
    pub url: String,
}

/// Image bytes streamed back by `GET /v1/random/{key}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filter for `GET /images/`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub tags: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filename_like: Option<String>,
}

impl ImageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>) -> Self {
        self.sort_by = Some(column.into());
        self
    }

    pub const fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn filename_like(mut self, pattern: impl Into<String>) -> Self {
        self.filename_like = Some(pattern.into());
        self
    }
}

impl From<ImageQuery> for QueryParams {
    fn from(query: ImageQuery) -> Self {
        let tags = (!query.tags.is_empty()).then_some(query.tags);
        QueryParams::new()
            .insert_opt("skip", query.skip)
            .insert_opt("limit", query.limit)
            .insert_opt("tags", tags)
            .insert_opt("sort_by", query.sort_by)
            .insert_opt("sort_order", query.sort_order.map(SortOrder::as_str))
            .insert_opt("filename_like", query.filename_like)
    }
}

/// Accepts RFC 3339 timestamps and offset-less ones (read as UTC); the
/// backend emits the latter when its database has no timezone support.
mod flexible_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn image_decodes_backend_payload() {
        let image: Image = serde_json::from_value(json!({
            "id": 7,
            "url": "https://cdn.example.com/cat.png",
            "description": null,
            "created_at": "2024-05-01T10:20:30.123456",
            "filename": "cat.png",
            "filetype": "png",
            "owner_id": 1,
            "tags": [{"id": 3, "name": "cat"}]
        }))
        .unwrap();
        assert_eq!(image.id, 7);
        assert_eq!(image.tags, vec![Tag { id: 3, name: "cat".into() }]);
        assert_eq!(
            image.created_at.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn timestamps_with_offset_are_normalized_to_utc() {
        let key: ApiKey = serde_json::from_value(json!({
            "id": 1,
            "key": "k-123",
            "name": "homepage",
            "created_at": "2024-05-01T12:00:00+02:00",
            "owner_id": 1
        }))
        .unwrap();
        assert_eq!(key.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert!(key.tags_and.is_empty());
    }

    #[test]
    fn user_update_omits_unset_fields() {
        let body = serde_json::to_value(UserUpdate {
            username: Some("alice".into()),
            password: None,
        })
        .unwrap();
        assert_eq!(body, json!({"username": "alice"}));
    }

    #[test]
    fn image_create_builder() {
        let body = serde_json::to_value(
            ImageCreate::new("https://x/y.png").description("y").tag("a").tag("b"),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"url": "https://x/y.png", "description": "y", "tags": ["a", "b"]})
        );
    }

    #[test]
    fn image_query_renders_only_set_fields() {
        let params: QueryParams = ImageQuery::new()
            .limit(20)
            .tag("cat")
            .tag("dog")
            .sort_order(SortOrder::Asc)
            .into();
        assert_eq!(
            params.to_pairs(),
            vec![
                ("limit".to_string(), "20".to_string()),
                ("tags".to_string(), "cat".to_string()),
                ("tags".to_string(), "dog".to_string()),
                ("sort_order".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn empty_image_query_renders_nothing() {
        let params: QueryParams = ImageQuery::new().into();
        assert!(params.is_empty());
    }
}

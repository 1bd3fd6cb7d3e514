//! Object storage layer
//!
//! Binary assets (floor images, apartment pictures, 3D models) live in a
//! bucket and are referenced by URL from the entities. [`ObjectStorage`]
//! is the seam: production uses the S3 implementation, tests the
//! in-memory one. Blob operations are best-effort companions to document
//! writes; nothing here is transactional.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStorage;
pub use s3::S3ObjectStorage;

use crate::errors::AppResult;

/// Metadata for a stored object, as returned by head/list operations
#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    /// Bare file name (final path segment)
    pub name: String,
    /// Full object key
    pub key: String,
    pub size: i64,
    pub content_type: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Deleting an absent key is not an error
    async fn delete(&self, key: &str) -> AppResult<()>;

    async fn exists(&self, key: &str) -> AppResult<bool>;

    async fn head(&self, key: &str) -> AppResult<Option<ObjectMetadata>>;

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMetadata>>;

    /// Server-side copy within the bucket
    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()>;

    /// Time-limited pre-authorized download URL
    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<String>;

    /// Stable public URL for an object
    fn public_url(&self, key: &str) -> String;
}

/// Collision-resistant object name: random identifier plus the original
/// file extension (if any).
pub fn unique_object_name(original_file_name: &str) -> String {
    let id = Uuid::new_v4();
    match original_file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!("{id}.{ext}"),
        _ => id.to_string(),
    }
}

/// Storage folder for a media `type` path segment: `3d` maps to models,
/// everything else to images.
pub fn folder_for_media_type(media_type: &str) -> &'static str {
    if media_type == "3d" { "models" } else { "images" }
}

/// Extensions accepted as floor images
pub fn is_image_file(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ["jpg", "jpeg", "png", "webp", "gif", "bmp"]
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Content type guessed from the file extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "glb" => "model/gltf-binary",
        "gltf" => "model/gltf+json",
        _ => "application/octet-stream",
    }
}

/// Recover the object key from a stored URL (public or presigned): the
/// path after the host, with any query string dropped.
pub fn key_from_url(url: &str) -> Option<String> {
    let without_query = url.split('?').next().unwrap_or(url);
    let rest = without_query
        .strip_prefix("https://")
        .or_else(|| without_query.strip_prefix("http://"))
        .unwrap_or(without_query);
    rest.split_once('/')
        .map(|(_, key)| key.to_string())
        .filter(|key| !key.is_empty())
}

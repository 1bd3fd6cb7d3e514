//! Generic binary asset handling
//!
//! Uploads go into a folder namespace under a collision-resistant name
//! (random id + original extension). Model and picture uploads return the
//! stable public URL; the media API returns 7-day signed URLs.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::errors::{AppError, AppResult};
use crate::services::UploadedFile;
use crate::storage::{self, ObjectStorage};

/// Result of an upload through the media API
#[derive(Debug, Clone, serde::Serialize)]
pub struct MediaUpload {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn ObjectStorage>,
    signed_url_ttl: Duration,
}

impl MediaService {
    pub fn new(storage: Arc<dyn ObjectStorage>, signed_url_ttl: Duration) -> Self {
        Self {
            storage,
            signed_url_ttl,
        }
    }

    pub fn storage(&self) -> Arc<dyn ObjectStorage> {
        self.storage.clone()
    }

    pub fn signed_url_ttl(&self) -> Duration {
        self.signed_url_ttl
    }

    fn resolve_content_type(file: &UploadedFile) -> String {
        file.content_type
            .clone()
            .unwrap_or_else(|| storage::content_type_for(&file.file_name).to_string())
    }

    /// Upload into `{folder}/` under a unique name and return a signed URL
    pub async fn upload(&self, file: &UploadedFile, folder: &str) -> AppResult<MediaUpload> {
        if file.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }
        let key = format!("{folder}/{}", storage::unique_object_name(&file.file_name));
        self.storage
            .put(&key, file.data.clone(), &Self::resolve_content_type(file))
            .await?;
        let url = self
            .storage
            .presign_get(&key, self.signed_url_ttl)
            .await?;
        Ok(MediaUpload { key, url })
    }

    /// Upload a 3D model and return its stable public URL
    pub async fn upload_model(&self, file: &UploadedFile) -> AppResult<String> {
        self.upload_public(file, "models").await
    }

    /// Upload an image and return its stable public URL
    pub async fn upload_image(&self, file: &UploadedFile) -> AppResult<String> {
        self.upload_public(file, "images").await
    }

    async fn upload_public(&self, file: &UploadedFile, folder: &str) -> AppResult<String> {
        if file.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }
        let key = format!("{folder}/{}", storage::unique_object_name(&file.file_name));
        self.storage
            .put(&key, file.data.clone(), &Self::resolve_content_type(file))
            .await?;
        Ok(self.storage.public_url(&key))
    }

    pub async fn delete_key(&self, key: &str) -> AppResult<()> {
        self.storage.delete(key).await
    }

    /// Best-effort delete of the blob a stored URL points at. Unparseable
    /// URLs and storage failures are logged, not propagated; the document
    /// operation they accompany should still proceed.
    pub async fn delete_by_url(&self, url: &str) {
        match storage::key_from_url(url) {
            Some(key) => {
                if let Err(e) = self.storage.delete(&key).await {
                    warn!("failed to delete blob {key}: {e}");
                }
            }
            None => warn!("could not derive storage key from url: {url}"),
        }
    }

    /// Signed URL for an existing object; `None` when the blob is absent
    pub async fn signed_url(&self, key: &str) -> AppResult<Option<String>> {
        if !self.storage.exists(key).await? {
            return Ok(None);
        }
        Ok(Some(
            self.storage.presign_get(key, self.signed_url_ttl).await?,
        ))
    }

    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        self.storage.exists(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryObjectStorage;
    use bytes::Bytes;

    fn service() -> (MediaService, Arc<MemoryObjectStorage>) {
        let storage = Arc::new(MemoryObjectStorage::new());
        (
            MediaService::new(storage.clone(), Duration::from_secs(604_800)),
            storage,
        )
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: None,
            data: Bytes::from_static(b"payload"),
        }
    }

    #[tokio::test]
    async fn upload_namespaces_and_signs() {
        let (media, storage) = service();
        let uploaded = media.upload(&file("plan.png"), "images").await.unwrap();

        assert!(uploaded.key.starts_with("images/"));
        assert!(uploaded.key.ends_with(".png"));
        assert!(uploaded.url.contains("expires_in=604800"));
        assert!(storage.contents(&uploaded.key).await.is_some());
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let (media, _) = service();
        let empty = UploadedFile {
            file_name: "empty.png".to_string(),
            content_type: None,
            data: Bytes::new(),
        };
        assert!(matches!(
            media.upload(&empty, "images").await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn delete_by_url_removes_the_blob() {
        let (media, storage) = service();
        let url = media.upload_model(&file("tower.glb")).await.unwrap();
        assert_eq!(storage.object_count().await, 1);

        media.delete_by_url(&url).await;
        assert_eq!(storage.object_count().await, 0);
    }

    #[tokio::test]
    async fn delete_by_url_on_absent_blob_is_silent() {
        let (media, _) = service();
        media
            .delete_by_url("https://storage.test/models/ghost.glb")
            .await;
    }

    #[tokio::test]
    async fn signed_url_for_missing_key_is_none() {
        let (media, _) = service();
        assert!(media.signed_url("images/nope.png").await.unwrap().is_none());
    }
}

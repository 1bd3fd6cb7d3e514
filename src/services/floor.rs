//! Floor service
//!
//! CRUD with optional 3D model handling, hotspot collection replacement,
//! and the floor-image namespace: blobs under `floors/{floor_id}/`,
//! filtered to image extensions, served through signed URLs. Rename is
//! copy-then-delete and therefore best-effort; a missing source aborts
//! before any write.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::database::repositories::FloorRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Floor, FloorCreateRequest, FloorUpdateRequest, HotspotUpdateRequest};
use crate::services::{MediaService, UploadedFile};
use crate::storage::{self, ObjectStorage};

/// Metadata for one image under a floor's storage namespace
#[derive(Debug, Clone, Serialize)]
pub struct FloorImageInfo {
    pub name: String,
    pub full_path: String,
    pub download_url: String,
    pub size: i64,
    pub content_type: Option<String>,
    pub upload_date: Option<DateTime<Utc>>,
    pub is_image: bool,
}

/// Extensions included in the plain URL listing
fn is_listed_image(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["jpg", "jpeg", "png", "webp"]
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

#[derive(Clone)]
pub struct FloorService {
    floors: FloorRepository,
    media: MediaService,
}

impl FloorService {
    pub fn new(floors: FloorRepository, media: MediaService) -> Self {
        Self { floors, media }
    }

    fn object_storage(&self) -> std::sync::Arc<dyn ObjectStorage> {
        self.media.storage()
    }

    fn signed_ttl(&self) -> Duration {
        self.media.signed_url_ttl()
    }

    fn image_prefix(floor_id: &str) -> String {
        format!("floors/{floor_id}/")
    }

    fn image_key(floor_id: &str, file_name: &str) -> String {
        format!("floors/{floor_id}/{file_name}")
    }

    pub async fn get_all(&self) -> AppResult<Vec<Floor>> {
        self.floors.documents().find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Floor> {
        self.floors.documents().get(id).await
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<Floor>> {
        self.floors.documents().find_by_id(id).await
    }

    pub async fn create(
        &self,
        mut request: FloorCreateRequest,
        model: Option<UploadedFile>,
    ) -> AppResult<Floor> {
        if let Some(file) = model.filter(|f| !f.is_empty()) {
            request.model3d_url = Some(self.media.upload_model(&file).await?);
        }
        let floor = self.floors.documents().save(&request).await?;
        info!("created floor {} ({})", floor.id, floor.name);
        Ok(floor)
    }

    pub async fn update(
        &self,
        id: &str,
        mut patch: FloorUpdateRequest,
        model: Option<UploadedFile>,
    ) -> AppResult<Floor> {
        if let Some(file) = model.filter(|f| !f.is_empty()) {
            if let Some(existing) = self.floors.documents().find_by_id(id).await? {
                if let Some(url) = existing.model3d_url {
                    self.media.delete_by_url(&url).await;
                }
            }
            patch.model3d_url = Some(self.media.upload_model(&file).await?);
        }

        self.floors.documents().update(id, &patch).await?;
        self.floors.documents().get(id).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if let Some(floor) = self.floors.documents().find_by_id(id).await? {
            if let Some(url) = floor.model3d_url {
                self.media.delete_by_url(&url).await;
            }
        }
        self.floors.documents().delete(id).await
    }

    pub async fn by_building(&self, building_id: &str) -> AppResult<Vec<Floor>> {
        self.floors.find_by_building(building_id).await
    }

    /// Replace the hotspot collections. A `None` part leaves that
    /// collection untouched.
    pub async fn update_hotspots(
        &self,
        id: &str,
        request: HotspotUpdateRequest,
    ) -> AppResult<Floor> {
        // Existence check up front so a bad id reports 404, not a silent no-op
        self.floors.documents().get(id).await?;

        let patch = FloorUpdateRequest {
            top_view_hotspots: request.top_view_hotspots,
            angle_hotspots: request.angle_hotspots,
            ..Default::default()
        };
        self.floors.documents().update(id, &patch).await?;
        self.floors.documents().get(id).await
    }

    /// Signed URLs for the floor's images, sorted by file name
    pub async fn list_images(&self, floor_id: &str) -> AppResult<Vec<String>> {
        let objects = self
            .object_storage()
            .list(&Self::image_prefix(floor_id))
            .await?;

        let mut named: Vec<_> = objects
            .into_iter()
            .filter(|o| is_listed_image(&o.name))
            .collect();
        named.sort_by(|a, b| a.name.cmp(&b.name));

        let mut urls = Vec::with_capacity(named.len());
        for object in named {
            urls.push(
                self.object_storage()
                    .presign_get(&object.key, self.signed_ttl())
                    .await?,
            );
        }
        Ok(urls)
    }

    /// Full metadata for the floor's images, sorted by file name
    pub async fn image_details(&self, floor_id: &str) -> AppResult<Vec<FloorImageInfo>> {
        let objects = self
            .object_storage()
            .list(&Self::image_prefix(floor_id))
            .await?;

        let mut named: Vec<_> = objects
            .into_iter()
            .filter(|o| storage::is_image_file(&o.name))
            .collect();
        named.sort_by(|a, b| a.name.cmp(&b.name));

        let mut details = Vec::with_capacity(named.len());
        for object in named {
            let download_url = self
                .object_storage()
                .presign_get(&object.key, self.signed_ttl())
                .await?;
            details.push(FloorImageInfo {
                is_image: true,
                name: object.name,
                full_path: object.key,
                download_url,
                size: object.size,
                content_type: object.content_type,
                upload_date: object.last_modified,
            });
        }
        Ok(details)
    }

    /// Upload one image into the floor's namespace. The original file
    /// name is kept unless a custom name is supplied; re-uploading the
    /// same name overwrites.
    pub async fn upload_image(
        &self,
        floor_id: &str,
        file: &UploadedFile,
        custom_file_name: Option<String>,
    ) -> AppResult<String> {
        if file.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }
        let file_name = custom_file_name.unwrap_or_else(|| file.file_name.clone());
        let key = Self::image_key(floor_id, &file_name);
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| storage::content_type_for(&file_name).to_string());

        self.object_storage()
            .put(&key, file.data.clone(), &content_type)
            .await?;
        Ok(self.object_storage().public_url(&key))
    }

    pub async fn delete_image(&self, floor_id: &str, file_name: &str) -> AppResult<()> {
        self.object_storage()
            .delete(&Self::image_key(floor_id, file_name))
            .await
    }

    /// Copy-then-delete rename. Not atomic: a crash between the two steps
    /// leaves both objects. A missing source fails before any write.
    pub async fn rename_image(
        &self,
        floor_id: &str,
        old_file_name: &str,
        new_file_name: &str,
    ) -> AppResult<FloorImageInfo> {
        let old_key = Self::image_key(floor_id, old_file_name);
        let new_key = Self::image_key(floor_id, new_file_name);

        if !self.object_storage().exists(&old_key).await? {
            return Err(AppError::not_found("floor image", old_file_name));
        }

        self.object_storage().copy(&old_key, &new_key).await?;
        self.object_storage().delete(&old_key).await?;

        self.image_info(floor_id, new_file_name)
            .await?
            .ok_or_else(|| AppError::storage("renamed image is missing"))
    }

    pub async fn image_info(
        &self,
        floor_id: &str,
        file_name: &str,
    ) -> AppResult<Option<FloorImageInfo>> {
        let key = Self::image_key(floor_id, file_name);
        let Some(object) = self.object_storage().head(&key).await? else {
            return Ok(None);
        };

        let download_url = self
            .object_storage()
            .presign_get(&key, self.signed_ttl())
            .await?;
        Ok(Some(FloorImageInfo {
            is_image: storage::is_image_file(file_name),
            name: object.name,
            full_path: object.key,
            download_url,
            size: object.size,
            content_type: object.content_type,
            upload_date: object.last_modified,
        }))
    }
}

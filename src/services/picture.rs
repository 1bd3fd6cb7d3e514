//! Picture service
//!
//! Orchestrates the ordered picture set per apartment. Uploads append
//! after the current maximum order; reordering reassigns zero-based
//! order integers by iterating the caller-supplied id ordering and
//! writing each picture individually, not an atomic batch.

use crate::database::repositories::PictureRepository;
use crate::errors::AppResult;
use crate::models::{Picture, PictureCreateRequest, PictureUpdateRequest};
use crate::services::{MediaService, UploadedFile};

#[derive(Clone)]
pub struct PictureService {
    pictures: PictureRepository,
    media: MediaService,
}

impl PictureService {
    pub fn new(pictures: PictureRepository, media: MediaService) -> Self {
        Self { pictures, media }
    }

    pub async fn get(&self, id: &str) -> AppResult<Picture> {
        self.pictures.documents().get(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Picture>> {
        self.pictures.documents().find_all().await
    }

    /// An apartment's pictures sorted by display order
    pub async fn for_apartment(&self, apartment_id: &str) -> AppResult<Vec<Picture>> {
        let mut pictures = self.pictures.find_by_apartment(apartment_id).await?;
        pictures.sort_by_key(|p| p.order);
        Ok(pictures)
    }

    /// Upload images for an apartment, appending after the current
    /// maximum order index.
    pub async fn upload_pictures(
        &self,
        apartment_id: &str,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<Picture>> {
        let existing = self.pictures.find_by_apartment(apartment_id).await?;
        let mut order = existing.iter().map(|p| p.order).max().map_or(0, |m| m + 1);

        let mut created = Vec::with_capacity(files.len());
        for file in files {
            let url = self.media.upload_image(&file).await?;
            let picture = self
                .pictures
                .documents()
                .save(&PictureCreateRequest {
                    apartment_id: apartment_id.to_string(),
                    url,
                    kind: None,
                    order,
                })
                .await?;
            created.push(picture);
            order += 1;
        }
        Ok(created)
    }

    /// Reassign zero-based orders following the supplied id sequence.
    /// Ids that do not belong to the apartment are skipped; each write is
    /// an individual update.
    pub async fn reorder_pictures(
        &self,
        apartment_id: &str,
        picture_ids: &[String],
    ) -> AppResult<Vec<Picture>> {
        let current = self.pictures.find_by_apartment(apartment_id).await?;

        for (index, picture_id) in picture_ids.iter().enumerate() {
            if current.iter().any(|p| &p.id == picture_id) {
                self.pictures
                    .documents()
                    .update(
                        picture_id,
                        &PictureUpdateRequest {
                            order: Some(index as i32),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }

        self.for_apartment(apartment_id).await
    }

    /// Reorder by id across apartments (missing ids are skipped)
    pub async fn update_picture_order(&self, picture_ids: &[String]) -> AppResult<()> {
        for (index, picture_id) in picture_ids.iter().enumerate() {
            if self
                .pictures
                .documents()
                .find_by_id(picture_id)
                .await?
                .is_some()
            {
                self.pictures
                    .documents()
                    .update(
                        picture_id,
                        &PictureUpdateRequest {
                            order: Some(index as i32),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Delete the picture document and, best-effort, its blob
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if let Some(picture) = self.pictures.documents().find_by_id(id).await? {
            self.media.delete_by_url(&picture.url).await;
        }
        self.pictures.documents().delete(id).await
    }

    pub async fn delete_all_for_apartment(&self, apartment_id: &str) -> AppResult<()> {
        for picture in self.pictures.find_by_apartment(apartment_id).await? {
            self.media.delete_by_url(&picture.url).await;
            self.pictures.documents().delete(&picture.id).await?;
        }
        Ok(())
    }
}

//! Apartment service
//!
//! CRUD plus equality filters and the price-range query. The store only
//! supports equality filtering, so the price range fetches everything and
//! filters in memory, O(n) in the apartment count.

use bigdecimal::BigDecimal;
use tracing::info;

use crate::database::repositories::ApartmentRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Apartment, ApartmentCreateRequest, ApartmentStatus, ApartmentUpdateRequest};
use crate::services::{MediaService, UploadedFile};

#[derive(Clone)]
pub struct ApartmentService {
    apartments: ApartmentRepository,
    media: MediaService,
}

impl ApartmentService {
    pub fn new(apartments: ApartmentRepository, media: MediaService) -> Self {
        Self { apartments, media }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Apartment>> {
        self.apartments.documents().find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Apartment> {
        self.apartments.documents().get(id).await
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<Apartment>> {
        self.apartments.documents().find_by_id(id).await
    }

    /// Create an apartment; an optional 3D model file is uploaded first
    /// and its URL stored on the entity.
    pub async fn create(
        &self,
        mut request: ApartmentCreateRequest,
        model: Option<UploadedFile>,
    ) -> AppResult<Apartment> {
        validate_price(&request.price)?;

        if let Some(file) = model.filter(|f| !f.is_empty()) {
            request.model3d_url = Some(self.media.upload_model(&file).await?);
        }

        let apartment = self.apartments.documents().save(&request).await?;
        info!("created apartment {} (lot {})", apartment.id, apartment.lot_number);
        Ok(apartment)
    }

    /// Partial update; replacing the 3D model deletes the prior blob
    /// first (best-effort), then uploads the new one.
    pub async fn update(
        &self,
        id: &str,
        mut patch: ApartmentUpdateRequest,
        model: Option<UploadedFile>,
    ) -> AppResult<Apartment> {
        if let Some(price) = &patch.price {
            validate_price(price)?;
        }

        if let Some(file) = model.filter(|f| !f.is_empty()) {
            if let Some(existing) = self.apartments.documents().find_by_id(id).await? {
                if let Some(url) = existing.model3d_url {
                    self.media.delete_by_url(&url).await;
                }
            }
            patch.model3d_url = Some(self.media.upload_model(&file).await?);
        }

        self.apartments.documents().update(id, &patch).await?;
        self.apartments.documents().get(id).await
    }

    /// Delete the apartment and, best-effort, its 3D model blob
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if let Some(apartment) = self.apartments.documents().find_by_id(id).await? {
            if let Some(url) = apartment.model3d_url {
                self.media.delete_by_url(&url).await;
            }
        }
        self.apartments.documents().delete(id).await
    }

    pub async fn by_status(&self, status: ApartmentStatus) -> AppResult<Vec<Apartment>> {
        self.apartments.find_by_status(status).await
    }

    pub async fn by_floor(&self, floor_id: &str) -> AppResult<Vec<Apartment>> {
        self.apartments.find_by_floor(floor_id).await
    }

    pub async fn by_unit_type(&self, unit_type: &str) -> AppResult<Vec<Apartment>> {
        self.apartments.find_by_unit_type(unit_type).await
    }

    /// Inclusive on both ends; filtered in memory
    pub async fn by_price_range(
        &self,
        min_price: &BigDecimal,
        max_price: &BigDecimal,
    ) -> AppResult<Vec<Apartment>> {
        let all = self.apartments.documents().find_all().await?;
        Ok(all
            .into_iter()
            .filter(|a| &a.price >= min_price && &a.price <= max_price)
            .collect())
    }
}

fn validate_price(price: &BigDecimal) -> AppResult<()> {
    if price < &BigDecimal::from(0) {
        return Err(AppError::validation("price must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;
    use crate::database::Database;
    use crate::storage::{self, MemoryObjectStorage, ObjectStorage};

    fn setup() -> (ApartmentService, Arc<MemoryObjectStorage>) {
        let database = Database::new_in_memory();
        let object_storage = Arc::new(MemoryObjectStorage::new());
        let media = MediaService::new(object_storage.clone(), Duration::from_secs(600));
        (
            ApartmentService::new(database.apartments(), media),
            object_storage,
        )
    }

    fn create_request(lot: &str, price: i64) -> ApartmentCreateRequest {
        ApartmentCreateRequest {
            floor_id: "f1".to_string(),
            lot_number: lot.to_string(),
            unit_type: "2 Bedroom".to_string(),
            area: 85.5,
            price: BigDecimal::from(price),
            status: ApartmentStatus::Available,
            description: None,
            media_urls: Vec::new(),
            model3d_url: None,
        }
    }

    fn model_file() -> UploadedFile {
        UploadedFile {
            file_name: "unit.glb".to_string(),
            content_type: Some("model/gltf-binary".to_string()),
            data: Bytes::from_static(b"glTF"),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_fields() {
        let (service, _) = setup();
        let created = service.create(create_request("101", 250_000), None).await.unwrap();

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched.lot_number, "101");
        assert_eq!(fetched.price, BigDecimal::from(250_000));
        assert_eq!(fetched.status, ApartmentStatus::Available);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let (service, _) = setup();
        let err = service
            .create(create_request("101", -1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn partial_update_keeps_unspecified_fields() {
        let (service, _) = setup();
        let created = service.create(create_request("101", 250_000), None).await.unwrap();

        let updated = service
            .update(
                &created.id,
                ApartmentUpdateRequest {
                    status: Some(ApartmentStatus::Sold),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ApartmentStatus::Sold);
        assert_eq!(updated.lot_number, "101");
        assert_eq!(updated.price, BigDecimal::from(250_000));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn model_upload_and_replacement() {
        let (service, object_storage) = setup();
        let created = service
            .create(create_request("101", 250_000), Some(model_file()))
            .await
            .unwrap();
        let first_url = created.model3d_url.clone().unwrap();
        let first_key = storage::key_from_url(&first_url).unwrap();
        assert!(object_storage.contents(&first_key).await.is_some());

        let updated = service
            .update(&created.id, ApartmentUpdateRequest::default(), Some(model_file()))
            .await
            .unwrap();
        let second_key = storage::key_from_url(&updated.model3d_url.unwrap()).unwrap();

        // prior blob deleted, new one present
        assert!(object_storage.contents(&first_key).await.is_none());
        assert!(object_storage.contents(&second_key).await.is_some());
    }

    #[tokio::test]
    async fn delete_removes_model_blob() {
        let (service, object_storage) = setup();
        let created = service
            .create(create_request("101", 250_000), Some(model_file()))
            .await
            .unwrap();
        assert_eq!(object_storage.object_count().await, 1);

        service.delete(&created.id).await.unwrap();
        assert_eq!(object_storage.object_count().await, 0);
        assert!(service.find(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_with_absent_blob_does_not_fail() {
        let (service, object_storage) = setup();
        let created = service
            .create(create_request("101", 250_000), Some(model_file()))
            .await
            .unwrap();
        let key = storage::key_from_url(created.model3d_url.as_deref().unwrap()).unwrap();
        object_storage.delete(&key).await.unwrap();

        service.delete(&created.id).await.unwrap();
    }

    #[tokio::test]
    async fn price_range_is_inclusive_on_both_ends() {
        let (service, _) = setup();
        for (lot, price) in [("a", 100), ("b", 200), ("c", 300), ("d", 400)] {
            service.create(create_request(lot, price), None).await.unwrap();
        }

        let mut in_range = service
            .by_price_range(&BigDecimal::from(200), &BigDecimal::from(300))
            .await
            .unwrap();
        in_range.sort_by(|a, b| a.lot_number.cmp(&b.lot_number));

        let lots: Vec<_> = in_range.iter().map(|a| a.lot_number.as_str()).collect();
        assert_eq!(lots, ["b", "c"]);
    }
}

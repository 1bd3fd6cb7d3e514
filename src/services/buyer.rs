//! Buyer service
//!
//! The store cannot express range queries or array membership, so the
//! date-range and apartment-of-interest filters fetch all buyers and
//! filter in memory, O(n) in total buyer count per call.

use chrono::{DateTime, Utc};

use crate::database::repositories::BuyerRepository;
use crate::errors::AppResult;
use crate::models::{Buyer, BuyerCreateRequest, BuyerStatus, BuyerUpdateRequest};

#[derive(Clone)]
pub struct BuyerService {
    buyers: BuyerRepository,
}

impl BuyerService {
    pub fn new(buyers: BuyerRepository) -> Self {
        Self { buyers }
    }

    pub async fn create(&self, request: BuyerCreateRequest) -> AppResult<Buyer> {
        self.buyers.documents().save(&request).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Buyer> {
        self.buyers.documents().get(id).await
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<Buyer>> {
        self.buyers.documents().find_by_id(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Buyer>> {
        self.buyers.documents().find_all().await
    }

    pub async fn update(&self, id: &str, patch: BuyerUpdateRequest) -> AppResult<Buyer> {
        self.buyers.documents().update(id, &patch).await?;
        self.buyers.documents().get(id).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.buyers.documents().delete(id).await
    }

    pub async fn by_status(&self, status: BuyerStatus) -> AppResult<Vec<Buyer>> {
        self.buyers.find_by_status(status).await
    }

    /// Buyers whose interest list contains the apartment
    pub async fn by_apartment(&self, apartment_id: &str) -> AppResult<Vec<Buyer>> {
        let all = self.buyers.documents().find_all().await?;
        Ok(all
            .into_iter()
            .filter(|b| b.interested_apartment_ids.iter().any(|a| a == apartment_id))
            .collect())
    }

    /// Buyers created within `[start, end]`, inclusive
    pub async fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Buyer>> {
        let all = self.buyers.documents().find_all().await?;
        Ok(all
            .into_iter()
            .filter(|b| b.created_at >= start && b.created_at <= end)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn service() -> BuyerService {
        BuyerService::new(Database::new_in_memory().buyers())
    }

    fn create_request(name: &str, apartments: &[&str]) -> BuyerCreateRequest {
        BuyerCreateRequest {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: Some("+1234567890".to_string()),
            status: BuyerStatus::Interested,
            interested_apartment_ids: apartments.iter().map(|s| s.to_string()).collect(),
            budget: Some(500_000.0),
            notes: None,
            contact_date: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();
        let created = service.create(create_request("john", &[])).await.unwrap();

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "john");
        assert_eq!(fetched.status, BuyerStatus::Interested);
        assert_eq!(fetched.budget, Some(500_000.0));
    }

    #[tokio::test]
    async fn partial_update_preserves_other_fields() {
        let service = service();
        let created = service.create(create_request("john", &[])).await.unwrap();

        let updated = service
            .update(
                &created.id,
                BuyerUpdateRequest {
                    status: Some(BuyerStatus::Negotiating),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, BuyerStatus::Negotiating);
        assert_eq!(updated.email, "john@example.com");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn apartment_filter_matches_interest_list() {
        let service = service();
        service.create(create_request("a", &["apt1", "apt2"])).await.unwrap();
        service.create(create_request("b", &["apt2"])).await.unwrap();
        service.create(create_request("c", &[])).await.unwrap();

        let interested = service.by_apartment("apt2").await.unwrap();
        assert_eq!(interested.len(), 2);
        let none = service.by_apartment("apt9").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn date_range_is_inclusive() {
        let service = service();
        let created = service.create(create_request("john", &[])).await.unwrap();

        let hits = service
            .by_date_range(created.created_at, created.created_at)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = service
            .by_date_range(
                created.created_at + chrono::Duration::seconds(1),
                created.created_at + chrono::Duration::seconds(2),
            )
            .await
            .unwrap();
        assert!(misses.is_empty());
    }
}

//! Apartment repository

use std::sync::Arc;

use serde_json::json;

use crate::database::repositories::generic::DocumentRepository;
use crate::database::store::DocumentStore;
use crate::errors::AppResult;
use crate::models::{Apartment, ApartmentStatus};

pub const COLLECTION: &str = "apartments";

#[derive(Clone)]
pub struct ApartmentRepository {
    inner: DocumentRepository<Apartment>,
}

impl ApartmentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: DocumentRepository::new(store, COLLECTION, "apartment"),
        }
    }

    pub fn documents(&self) -> &DocumentRepository<Apartment> {
        &self.inner
    }

    pub async fn find_by_status(&self, status: ApartmentStatus) -> AppResult<Vec<Apartment>> {
        self.inner
            .find_by_field("status", serde_json::to_value(status)?)
            .await
    }

    pub async fn find_by_floor(&self, floor_id: &str) -> AppResult<Vec<Apartment>> {
        self.inner.find_by_field("floor_id", json!(floor_id)).await
    }

    pub async fn find_by_unit_type(&self, unit_type: &str) -> AppResult<Vec<Apartment>> {
        self.inner
            .find_by_field("unit_type", json!(unit_type))
            .await
    }
}

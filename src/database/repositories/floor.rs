//! Floor repository

use std::sync::Arc;

use serde_json::json;

use crate::database::repositories::generic::DocumentRepository;
use crate::database::store::DocumentStore;
use crate::errors::AppResult;
use crate::models::Floor;

pub const COLLECTION: &str = "floors";

#[derive(Clone)]
pub struct FloorRepository {
    inner: DocumentRepository<Floor>,
}

impl FloorRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: DocumentRepository::new(store, COLLECTION, "floor"),
        }
    }

    pub fn documents(&self) -> &DocumentRepository<Floor> {
        &self.inner
    }

    pub async fn find_by_building(&self, building_id: &str) -> AppResult<Vec<Floor>> {
        self.inner
            .find_by_field("building_id", json!(building_id))
            .await
    }
}

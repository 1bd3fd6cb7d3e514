//! Buyer repository

use std::sync::Arc;

use crate::database::repositories::generic::DocumentRepository;
use crate::database::store::DocumentStore;
use crate::errors::AppResult;
use crate::models::{Buyer, BuyerStatus};

pub const COLLECTION: &str = "buyers";

#[derive(Clone)]
pub struct BuyerRepository {
    inner: DocumentRepository<Buyer>,
}

impl BuyerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: DocumentRepository::new(store, COLLECTION, "buyer"),
        }
    }

    pub fn documents(&self) -> &DocumentRepository<Buyer> {
        &self.inner
    }

    pub async fn find_by_status(&self, status: BuyerStatus) -> AppResult<Vec<Buyer>> {
        self.inner
            .find_by_field("status", serde_json::to_value(status)?)
            .await
    }
}

//! Document database layer
//!
//! [`Database`] wraps the document-store seam and hands out the domain
//! repositories. Production wires in [`DynamoDocumentStore`]; tests use
//! [`MemoryDocumentStore`] for a dependency-free stack.

use std::sync::Arc;

use tracing::info;

pub mod attrs;
pub mod memory;
pub mod repositories;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use store::{DocumentStore, DynamoDocumentStore};

use crate::errors::AppResult;
use repositories::{
    ApartmentRepository, BuyerRepository, FloorRepository, PictureRepository, UserRepository,
};

/// Collections the service expects to exist, probed at startup
pub const COLLECTIONS: [&str; 5] = ["floors", "apartments", "buyers", "pictures", "users"];

#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Process-local database for tests
    pub fn new_in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// Probe every expected collection, creating the ones that are absent.
    /// Idempotent; safe to run on every startup.
    pub async fn ensure_collections(&self) -> AppResult<()> {
        for collection in COLLECTIONS {
            self.store.ensure_collection(collection).await?;
            info!("collection ready: {collection}");
        }
        Ok(())
    }

    pub fn floors(&self) -> FloorRepository {
        FloorRepository::new(self.store.clone())
    }

    pub fn apartments(&self) -> ApartmentRepository {
        ApartmentRepository::new(self.store.clone())
    }

    pub fn buyers(&self) -> BuyerRepository {
        BuyerRepository::new(self.store.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn pictures(&self) -> PictureRepository {
        PictureRepository::new(self.store.clone())
    }
}

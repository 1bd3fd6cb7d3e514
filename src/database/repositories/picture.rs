//! Picture repository

use std::sync::Arc;

use serde_json::json;

use crate::database::repositories::generic::DocumentRepository;
use crate::database::store::DocumentStore;
use crate::errors::AppResult;
use crate::models::Picture;

pub const COLLECTION: &str = "pictures";

#[derive(Clone)]
pub struct PictureRepository {
    inner: DocumentRepository<Picture>,
}

impl PictureRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: DocumentRepository::new(store, COLLECTION, "picture"),
        }
    }

    pub fn documents(&self) -> &DocumentRepository<Picture> {
        &self.inner
    }

    pub async fn find_by_apartment(&self, apartment_id: &str) -> AppResult<Vec<Picture>> {
        self.inner
            .find_by_field("apartment_id", json!(apartment_id))
            .await
    }
}

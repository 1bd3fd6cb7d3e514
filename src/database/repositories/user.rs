//! User repository

use std::sync::Arc;

use serde_json::json;

use crate::database::repositories::generic::DocumentRepository;
use crate::database::store::DocumentStore;
use crate::errors::AppResult;
use crate::models::User;

pub const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    inner: DocumentRepository<User>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: DocumentRepository::new(store, COLLECTION, "user"),
        }
    }

    pub fn documents(&self) -> &DocumentRepository<User> {
        &self.inner
    }

    /// Email uniqueness is checked (not enforced by storage), so this
    /// returns the first match if duplicates ever slip in.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let mut users = self.inner.find_by_field("email", json!(email)).await?;
        Ok(if users.is_empty() {
            None
        } else {
            Some(users.swap_remove(0))
        })
    }
}

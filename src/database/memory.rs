//! In-memory document store
//!
//! Implements the same collection/document semantics as the DynamoDB
//! store over a process-local map. Used by the unit and integration test
//! suites so the full service stack can run without AWS.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::database::attrs::JsonMap;
use crate::database::store::DocumentStore;
use crate::errors::{AppError, AppResult};

type Collections = HashMap<String, HashMap<String, JsonMap>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> AppResult<()> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn put(&self, collection: &str, item: JsonMap) -> AppResult<()> {
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::database("document is missing an id"))?
            .to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id, item);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: JsonMap) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| AppError::not_found(collection, id))?;
        for (key, value) in fields {
            document.insert(key, value);
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<JsonMap>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        if let Some(documents) = self.collections.write().await.get_mut(collection) {
            documents.remove(id);
        }
        Ok(())
    }

    async fn scan(&self, collection: &str) -> AppResult<Vec<JsonMap>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn scan_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> AppResult<Vec<JsonMap>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map(|c| {
                c.values()
                    .filter(|doc| doc.get(field) == Some(&value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

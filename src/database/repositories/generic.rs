//! Generic entity repository
//!
//! Binds an entity type to a named collection over the document-store
//! seam. `save` assigns the id and stamps both timestamps; `update` stamps
//! `updated_at` and merges only the fields present in the patch. All
//! operations wait for the underlying store call to complete; store errors
//! surface unwrapped into the application error type with no retries.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::database::attrs::JsonMap;
use crate::database::store::DocumentStore;
use crate::errors::{AppError, AppResult};

pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    /// Singular resource name used in not-found errors
    resource: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            collection: self.collection,
            resource: self.resource,
            _entity: PhantomData,
        }
    }
}

impl<T> DocumentRepository<T>
where
    T: DeserializeOwned + Send,
{
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: &'static str,
        resource: &'static str,
    ) -> Self {
        Self {
            store,
            collection,
            resource,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Persist a new document: generates the id, stamps creation and
    /// update times, and returns the hydrated entity.
    pub async fn save<C>(&self, create: &C) -> AppResult<T>
    where
        C: Serialize + Sync,
    {
        let mut item = to_object(create)?;
        let id = Uuid::new_v4().to_string();
        let now = serde_json::to_value(Utc::now())?;
        item.insert("id".to_string(), Value::String(id));
        item.insert("created_at".to_string(), now.clone());
        item.insert("updated_at".to_string(), now);

        self.store.put(self.collection, item.clone()).await?;
        self.hydrate(item)
    }

    /// Merge the patch's present fields into an existing document and
    /// stamp `updated_at`. Absent fields retain their prior values.
    pub async fn update<U>(&self, id: &str, patch: &U) -> AppResult<()>
    where
        U: Serialize + Sync,
    {
        let mut fields = to_object(patch)?;
        // The id is the document key, never a mergeable field
        fields.remove("id");
        fields.insert(
            "updated_at".to_string(),
            serde_json::to_value(Utc::now())?,
        );
        self.store.update(self.collection, id, fields).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(self.collection, id).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        match self.store.get(self.collection, id).await? {
            Some(item) => Ok(Some(self.hydrate(item)?)),
            None => Ok(None),
        }
    }

    /// Like [`find_by_id`](Self::find_by_id), but absent documents become
    /// a `NotFound` error.
    pub async fn get(&self, id: &str) -> AppResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(self.resource, id))
    }

    pub async fn find_all(&self) -> AppResult<Vec<T>> {
        let items = self.store.scan(self.collection).await?;
        items.into_iter().map(|item| self.hydrate(item)).collect()
    }

    /// Equality filter on a single field. No ranges, sorts, or compound
    /// predicates; callers needing those filter in memory.
    pub async fn find_by_field(&self, field: &str, value: Value) -> AppResult<Vec<T>> {
        let items = self.store.scan_eq(self.collection, field, value).await?;
        items.into_iter().map(|item| self.hydrate(item)).collect()
    }

    fn hydrate(&self, item: JsonMap) -> AppResult<T> {
        serde_json::from_value(Value::Object(item)).map_err(|e| {
            AppError::database(format!(
                "malformed document in {}: {e}",
                self.collection
            ))
        })
    }
}

fn to_object<S: Serialize>(value: &S) -> AppResult<JsonMap> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "expected an object document, got {other}"
        ))),
    }
}

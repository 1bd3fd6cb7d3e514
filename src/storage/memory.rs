//! In-memory object storage for tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::AppResult;
use crate::storage::{ObjectMetadata, ObjectStorage};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contents(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.data.to_vec())
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    fn file_name_of(key: &str) -> String {
        key.rsplit('/').next().unwrap_or(key).to_string()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn head(&self, key: &str) -> AppResult<Option<ObjectMetadata>> {
        Ok(self.objects.read().await.get(key).map(|o| ObjectMetadata {
            name: Self::file_name_of(key),
            key: key.to_string(),
            size: o.data.len() as i64,
            content_type: Some(o.content_type.clone()),
            last_modified: Some(o.last_modified),
        }))
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMetadata>> {
        Ok(self
            .objects
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, o)| ObjectMetadata {
                name: Self::file_name_of(key),
                key: key.clone(),
                size: o.data.len() as i64,
                content_type: Some(o.content_type.clone()),
                last_modified: Some(o.last_modified),
            })
            .collect())
    }

    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()> {
        let mut objects = self.objects.write().await;
        if let Some(object) = objects.get(source_key).cloned() {
            objects.insert(dest_key.to_string(), object);
        }
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<String> {
        Ok(format!(
            "https://storage.test/{key}?expires_in={}",
            ttl.as_secs()
        ))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://storage.test/{key}")
    }
}

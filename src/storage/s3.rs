//! S3-backed object storage

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::DateTime;

use crate::errors::{AppError, AppResult};
use crate::storage::{ObjectMetadata, ObjectStorage};

#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    /// Overrides the generated public URL base when fronted by a CDN
    public_base_url: Option<String>,
}

impl S3ObjectStorage {
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        region: impl Into<String>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            region: region.into(),
            public_base_url,
        }
    }

    fn file_name_of(key: &str) -> String {
        key.rsplit('/').next().unwrap_or(key).to_string()
    }

    fn to_chrono(ts: &aws_sdk_s3::primitives::DateTime) -> Option<chrono::DateTime<chrono::Utc>> {
        DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    #[tracing::instrument(skip(self, data))]
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::storage(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::storage(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.head(key).await?.is_some())
    }

    async fn head(&self, key: &str) -> AppResult<Option<ObjectMetadata>> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(ObjectMetadata {
                name: Self::file_name_of(key),
                key: key.to_string(),
                size: output.content_length.unwrap_or(0),
                content_type: output.content_type,
                last_modified: output.last_modified.as_ref().and_then(Self::to_chrono),
            })),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(None)
                } else {
                    Err(AppError::storage(service_err.to_string()))
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectMetadata>> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| AppError::storage(e.to_string()))?;

            for object in output.contents.unwrap_or_default() {
                let Some(key) = object.key else { continue };
                objects.push(ObjectMetadata {
                    name: Self::file_name_of(&key),
                    key,
                    size: object.size.unwrap_or(0),
                    content_type: None,
                    last_modified: object.last_modified.as_ref().and_then(Self::to_chrono),
                });
            }

            match output.next_continuation_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(objects)
    }

    #[tracing::instrument(skip(self))]
    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, source_key))
            .key(dest_key)
            .send()
            .await
            .map_err(|e| AppError::storage(e.to_string()))?;
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> AppResult<String> {
        let config =
            PresigningConfig::expires_in(ttl).map_err(|e| AppError::storage(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| AppError::storage(e.to_string()))?;
        Ok(request.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

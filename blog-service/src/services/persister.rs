//! Writes generated posts to object storage.

use crate::models::StoredBlob;
use crate::services::storage::Storage;
use service_core::error::AppError;
use std::sync::Arc;

pub struct BlobPersister {
    storage: Arc<dyn Storage>,
}

impl BlobPersister {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Issue a single full-replace write of `content` to `bucket/key`.
    ///
    /// Content is not inspected; the sentinel failure text is stored like
    /// any other post.
    pub async fn persist(
        &self,
        content: &str,
        key: &str,
        bucket: &str,
    ) -> Result<StoredBlob, AppError> {
        self.storage
            .put(bucket, key, content.as_bytes().to_vec())
            .await?;

        let blob = StoredBlob {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: content.to_string(),
        };
        tracing::info!(uri = %blob.uri(), bytes = content.len(), "Blog post saved");
        Ok(blob)
    }
}

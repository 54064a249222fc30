use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use service_core::error::AppError;
use std::path::PathBuf;
use tokio::fs;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Create or fully replace the object at `bucket/key`.
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), AppError>;
}

/// Writes objects under `<base_path>/<bucket>/<key>`.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn path_for(&self, bucket: &str, key: &str) -> PathBuf {
        self.base_path.join(bucket).join(key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        let path = self.path_for(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, data).await?;
        Ok(())
    }
}

pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/plain; charset=utf-8")
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!(
                    "S3 upload failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

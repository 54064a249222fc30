use serde::Serialize;

/// A blog post written to object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBlob {
    pub bucket: String,
    pub key: String,
    pub body: String,
}

impl StoredBlob {
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

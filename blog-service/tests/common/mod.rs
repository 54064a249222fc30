#![allow(dead_code)]

use async_trait::async_trait;
use blog_service::config::{BlogConfig, FailurePolicy, ObjectKeyStrategy};
use blog_service::handlers::BlogHandler;
use blog_service::services::providers::mock::MockInferenceClient;
use blog_service::services::Storage;
use blog_service::startup::Application;
use service_core::error::AppError;
use std::sync::{Arc, Mutex};

pub const TEST_BUCKET: &str = "aws_bedrock_blogs_generated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub body: String,
}

/// Records every put; optionally fails them all.
#[derive(Default)]
pub struct RecordingStorage {
    calls: Mutex<Vec<PutCall>>,
    fail: bool,
}

impl RecordingStorage {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(PutCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: String::from_utf8(data).unwrap(),
        });

        if self.fail {
            return Err(AppError::InternalError(anyhow::anyhow!("bucket is gone")));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub handler: Arc<BlogHandler>,
    pub inference: Arc<MockInferenceClient>,
    pub storage: Arc<RecordingStorage>,
}

pub fn config(policy: FailurePolicy, strategy: ObjectKeyStrategy) -> BlogConfig {
    let mut config = BlogConfig::defaults();
    config.failure_policy = policy;
    config.storage.key_strategy = strategy;
    config
}

impl TestApp {
    /// Handler wired with the shipped default configuration.
    pub fn spawn(inference: MockInferenceClient, storage: RecordingStorage) -> Self {
        Self::spawn_with(BlogConfig::defaults(), inference, storage)
    }

    pub fn spawn_with(
        config: BlogConfig,
        inference: MockInferenceClient,
        storage: RecordingStorage,
    ) -> Self {
        let inference = Arc::new(inference);
        let storage = Arc::new(storage);
        let app = Application::with_clients(&config, inference.clone(), storage.clone());

        TestApp {
            handler: app.handler(),
            inference,
            storage,
        }
    }
}

pub fn event_for(topic: &str) -> serde_json::Value {
    serde_json::json!({
        "body": serde_json::json!({ "blog_topic": topic }).to_string()
    })
}

/// True for `blog-output/YYYY-MM-DD HH:MM:SS.txt`.
pub fn is_timestamp_key(key: &str) -> bool {
    let Some(stamp) = key
        .strip_prefix("blog-output/")
        .and_then(|rest| rest.strip_suffix(".txt"))
    else {
        return false;
    };
    chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok()
}

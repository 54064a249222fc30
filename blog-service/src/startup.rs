//! Cold-start wiring and the Lambda runtime loop.

use crate::config::{BlogConfig, StorageBackend};
use crate::handlers::BlogHandler;
use crate::services::providers::bedrock::BedrockClient;
use crate::services::providers::InferenceClient;
use crate::services::{BlobPersister, InferenceInvoker, LocalStorage, S3Storage, Storage};
use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use service_core::error::AppError;
use std::sync::Arc;

pub struct Application {
    handler: Arc<BlogHandler>,
}

impl Application {
    /// Build clients once so warm invocations reuse their connections.
    pub async fn build(config: BlogConfig) -> Result<Self, AppError> {
        let inference: Arc<dyn InferenceClient> =
            Arc::new(BedrockClient::from_config(&config.bedrock).await);

        let storage: Arc<dyn Storage> = match config.storage.backend {
            StorageBackend::S3 => {
                let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
                Arc::new(S3Storage::new(aws_sdk_s3::Client::new(&sdk_config)))
            }
            StorageBackend::Local => Arc::new(LocalStorage::new(&config.storage.local_path).await?),
        };

        tracing::info!(
            model = %config.bedrock.model_id,
            backend = ?config.storage.backend,
            bucket = %config.storage.bucket,
            key_strategy = ?config.storage.key_strategy,
            failure_policy = ?config.failure_policy,
            "Initialized blog service"
        );

        Ok(Self::with_clients(&config, inference, storage))
    }

    pub fn with_clients(
        config: &BlogConfig,
        inference: Arc<dyn InferenceClient>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let invoker = InferenceInvoker::new(
            inference,
            config.bedrock.model_id.clone(),
            config.generation,
        );
        let persister = BlobPersister::new(storage);

        Self {
            handler: Arc::new(BlogHandler::new(config, invoker, persister)),
        }
    }

    pub fn handler(&self) -> Arc<BlogHandler> {
        self.handler.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), lambda_runtime::Error> {
        let handler = self.handler;
        lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
            let handler = handler.clone();
            async move {
                let (payload, context) = event.into_parts();
                handler
                    .handle(payload, Some(context.request_id.as_str()))
                    .await
                    .map_err(lambda_runtime::Error::from)
            }
        }))
        .await
    }
}

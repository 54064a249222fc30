//! Amazon Bedrock runtime client.

use super::{InferenceClient, ProviderError};
use crate::config::BedrockConfig;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;

pub struct BedrockClient {
    client: Client,
}

impl BedrockClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Build a client pinned to the configured region with the configured
    /// read timeout and retry budget. Retries are left to the SDK.
    pub async fn from_config(config: &BedrockConfig) -> Self {
        let sdk_config = sdk_loader(config).load().await;

        tracing::info!(
            region = %config.region,
            read_timeout_secs = config.read_timeout_secs,
            max_retries = config.max_retries,
            "Initialized Bedrock runtime client"
        );

        Self::new(&sdk_config)
    }
}

fn sdk_loader(config: &BedrockConfig) -> ConfigLoader {
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .timeout_config(
            TimeoutConfig::builder()
                .read_timeout(config.read_timeout())
                .build(),
        )
        .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts()));

    match &config.endpoint_url {
        Some(url) => loader.endpoint_url(url.clone()),
        None => loader,
    }
}

#[async_trait]
impl InferenceClient for BedrockClient {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                if e.as_service_error().is_some() {
                    ProviderError::Api(message)
                } else {
                    ProviderError::Transport(message)
                }
            })?;

        Ok(output.body.into_inner())
    }
}

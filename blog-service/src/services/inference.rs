//! Prompt construction and model invocation.

use crate::config::GenerationConfig;
use crate::models::InferencePayload;
use crate::services::providers::{InferenceClient, ProviderError};
use std::sync::Arc;

/// Text substituted for a failed generation when failures are masked.
pub const GENERATION_FAILED_SENTINEL: &str = "An error occurred while generating the blog post.";

const GENERATION_FIELD: &str = "generation";

pub struct InferenceInvoker {
    client: Arc<dyn InferenceClient>,
    model_id: String,
    params: GenerationConfig,
}

impl InferenceInvoker {
    pub fn new(client: Arc<dyn InferenceClient>, model_id: String, params: GenerationConfig) -> Self {
        Self {
            client,
            model_id,
            params,
        }
    }

    pub fn payload_for(&self, topic: &str) -> InferencePayload {
        InferencePayload::for_topic(topic, &self.params)
    }

    /// Generate a post for `topic` and return the model's full text.
    pub async fn generate(&self, topic: &str) -> Result<String, ProviderError> {
        let payload = self.payload_for(topic);
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ProviderError::InvalidResponse(format!("request encoding: {}", e)))?;

        tracing::debug!(
            model = %self.model_id,
            prompt_len = payload.prompt.len(),
            "Sending request to inference endpoint"
        );

        let raw = self.client.invoke(&self.model_id, body).await?;
        let response: serde_json::Value = serde_json::from_slice(&raw)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        tracing::debug!(response = %response, "Received inference response");

        response
            .get(GENERATION_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(ProviderError::MissingField(GENERATION_FIELD))
    }

    /// Like [`generate`](Self::generate) but logs the failure and returns
    /// [`GENERATION_FAILED_SENTINEL`] instead. Callers cannot tell the
    /// sentinel apart from model output.
    pub async fn generate_or_sentinel(&self, topic: &str) -> String {
        match self.generate(topic).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, model = %self.model_id, "Error generating blog post");
                GENERATION_FAILED_SENTINEL.to_string()
            }
        }
    }
}

//! Per-invocation pipeline: parse, generate, persist, respond.

use crate::config::{BlogConfig, FailurePolicy};
use crate::models::{GenerationRequest, ResponseEnvelope};
use crate::services::{BlobPersister, InferenceInvoker, ObjectKeyBuilder};
use chrono::{DateTime, Local};
use serde_json::Value;
use service_core::error::AppError;

pub struct BlogHandler {
    invoker: InferenceInvoker,
    persister: BlobPersister,
    keys: ObjectKeyBuilder,
    bucket: String,
    policy: FailurePolicy,
}

impl BlogHandler {
    pub fn new(config: &BlogConfig, invoker: InferenceInvoker, persister: BlobPersister) -> Self {
        Self {
            invoker,
            persister,
            keys: ObjectKeyBuilder::new(
                config.storage.key_prefix.clone(),
                config.storage.key_strategy,
            ),
            bucket: config.storage.bucket.clone(),
            policy: config.failure_policy,
        }
    }

    pub async fn handle(
        &self,
        event: Value,
        invocation_id: Option<&str>,
    ) -> Result<ResponseEnvelope, AppError> {
        self.handle_at(event, invocation_id, Local::now()).await
    }

    /// [`handle`](Self::handle) with an explicit clock reading for the key.
    ///
    /// Under [`FailurePolicy::Mask`] malformed input is the only error
    /// returned; everything downstream answers with the success envelope.
    /// Under [`FailurePolicy::Surface`] every failure becomes an error
    /// envelope and `Err` is never returned.
    pub async fn handle_at(
        &self,
        event: Value,
        invocation_id: Option<&str>,
        now: DateTime<Local>,
    ) -> Result<ResponseEnvelope, AppError> {
        let request = match GenerationRequest::from_event(&event) {
            Ok(request) => request,
            Err(e) => return self.reject(e),
        };

        tracing::info!(topic = %request.topic(), "Generating blog post");

        let text = match self.policy {
            FailurePolicy::Mask => self.invoker.generate_or_sentinel(request.topic()).await,
            FailurePolicy::Surface => match self.invoker.generate(request.topic()).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "Error generating blog post");
                    return Ok(ResponseEnvelope::from_error(&AppError::BadGateway(
                        e.to_string(),
                    )));
                }
            },
        };

        if text.is_empty() {
            tracing::warn!("No blog generated");
            return Ok(ResponseEnvelope::success());
        }

        let key = self.keys.key_for(&now, invocation_id);
        if let Err(e) = self.persister.persist(&text, &key, &self.bucket).await {
            tracing::error!(error = %e, bucket = %self.bucket, key = %key, "Error saving blog post");
            if self.policy == FailurePolicy::Surface {
                return Ok(ResponseEnvelope::from_error(&e));
            }
        }

        Ok(ResponseEnvelope::success())
    }

    fn reject(&self, err: AppError) -> Result<ResponseEnvelope, AppError> {
        tracing::error!(error = %err, "Rejected invocation event");
        match self.policy {
            FailurePolicy::Mask => Err(err),
            FailurePolicy::Surface => Ok(ResponseEnvelope::from_error(&err)),
        }
    }
}

//! Mock inference client for tests and local runs.

use super::{InferenceClient, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockOutcome {
    Body(Vec<u8>),
    Fail(String),
}

/// Returns a canned body (or transport error) and records every request.
pub struct MockInferenceClient {
    outcome: MockOutcome,
    requests: Mutex<Vec<RecordedInvocation>>,
}

#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    pub model_id: String,
    pub body: Vec<u8>,
}

impl RecordedInvocation {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

impl MockInferenceClient {
    /// Respond with `{"generation": text}`.
    pub fn with_generation(text: &str) -> Self {
        Self::with_body(serde_json::json!({ "generation": text }).to_string().into_bytes())
    }

    pub fn with_body(body: Vec<u8>) -> Self {
        Self {
            outcome: MockOutcome::Body(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: MockOutcome::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedInvocation> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let recorded = RecordedInvocation {
            model_id: model_id.to_string(),
            body,
        };
        match self.requests.lock() {
            Ok(mut requests) => requests.push(recorded),
            Err(poisoned) => poisoned.into_inner().push(recorded),
        }

        match &self.outcome {
            MockOutcome::Body(body) => Ok(body.clone()),
            MockOutcome::Fail(message) => Err(ProviderError::Transport(message.clone())),
        }
    }
}

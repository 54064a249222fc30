//! Inference backend abstractions and implementations.
//!
//! The generation pipeline only sees [`InferenceClient`], so the hosted
//! model endpoint can be swapped for a test double.

pub mod bedrock;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),
}

/// A hosted model reachable by identifier.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send a serialized request body and return the full response body.
    async fn invoke(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, ProviderError>;
}

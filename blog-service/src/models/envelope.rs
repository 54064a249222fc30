//! Response returned to the function invoker.

use serde::{Deserialize, Serialize};
use service_core::error::AppError;

pub const SUCCESS_MESSAGE: &str = "Blog generation completed successfully.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded message.
    pub body: String,
}

impl ResponseEnvelope {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::from(SUCCESS_MESSAGE).to_string(),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        let body = serde_json::to_string(&err.error_body())
            .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        Self {
            status_code: err.status_code().as_u16(),
            body,
        }
    }
}

//! Inbound event parsing.

use serde::Deserialize;
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

/// The topic extracted from an invocation event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 1, message = "blog_topic must not be empty"))]
    pub blog_topic: String,
}

impl GenerationRequest {
    /// Parse `{"body": "<json string>"}` where the inner document carries
    /// `blog_topic`.
    pub fn from_event(event: &Value) -> Result<Self, AppError> {
        let body = event
            .get("body")
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("event has no body")))?
            .as_str()
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("event body must be a string")))?;

        let request: GenerationRequest = serde_json::from_str(body)?;
        request.validate()?;
        Ok(request)
    }

    pub fn topic(&self) -> &str {
        &self.blog_topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;

    #[test]
    fn parses_nested_body() {
        let event = json!({ "body": "{\"blog_topic\": \"cloud computing\"}" });
        let request = GenerationRequest::from_event(&event).unwrap();
        assert_eq!(request.topic(), "cloud computing");
    }

    #[test]
    fn ignores_unknown_fields() {
        let event = json!({
            "body": "{\"blog_topic\": \"rust\", \"tone\": \"casual\"}",
            "headers": { "content-type": "application/json" }
        });
        assert_eq!(GenerationRequest::from_event(&event).unwrap().topic(), "rust");
    }

    #[test]
    fn missing_body_is_bad_request() {
        let err = GenerationRequest::from_event(&json!({})).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn non_string_body_is_bad_request() {
        let event = json!({ "body": { "blog_topic": "rust" } });
        let err = GenerationRequest::from_event(&event).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_topic_is_bad_request() {
        let event = json!({ "body": "{\"title\": \"rust\"}" });
        let err = GenerationRequest::from_event(&event).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let event = json!({ "body": "{blog_topic" });
        assert!(GenerationRequest::from_event(&event).is_err());
    }

    #[test]
    fn empty_topic_fails_validation() {
        let event = json!({ "body": "{\"blog_topic\": \"\"}" });
        let err = GenerationRequest::from_event(&event).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

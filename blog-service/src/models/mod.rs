//! Domain models for the blog service.

pub mod blob;
pub mod envelope;
pub mod inference;
pub mod request;

pub use blob::StoredBlob;
pub use envelope::{ResponseEnvelope, SUCCESS_MESSAGE};
pub use inference::{InferencePayload, PROMPT_TEMPLATE};
pub use request::GenerationRequest;

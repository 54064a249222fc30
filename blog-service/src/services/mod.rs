pub mod inference;
pub mod keys;
pub mod persister;
pub mod providers;
pub mod storage;

pub use inference::{InferenceInvoker, GENERATION_FAILED_SENTINEL};
pub use keys::ObjectKeyBuilder;
pub use persister::BlobPersister;
pub use storage::{LocalStorage, S3Storage, Storage};

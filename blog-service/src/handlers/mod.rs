//! Invocation handlers for the blog service.

pub mod blog;

pub use blog::BlogHandler;

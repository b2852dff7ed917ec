//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports.

pub mod file_store;
pub mod gemini;

pub use file_store::FileSessionStore;
pub use gemini::GeminiClient;

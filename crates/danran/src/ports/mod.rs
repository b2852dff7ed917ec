//! Ports Layer
//!
//! Abstract interfaces for external collaborators. Concrete adapters live in
//! the server crate.

pub mod repositories;
pub mod services;

pub use repositories::SessionStore;
pub use services::{GenerationOptions, GenerationService};

//! Service Ports

pub mod generation;

pub use generation::{GenerationOptions, GenerationService};

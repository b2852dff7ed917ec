//! Generation Service Port
//!
//! Abstract interface for the external text-generation collaborator. The
//! client carries its own credentials - there is no process-wide key, the
//! orchestrator receives the service as an explicit dependency.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Options for a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 200,
            temperature: 0.8,
        }
    }
}

impl GenerationOptions {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// External generation service interface
///
/// Network or quota failures surface as `DomainError::GenerationUnavailable`.
/// Callers of `generate_structured` own the parsing and must tolerate
/// non-JSON or partially-JSON output.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate free-form text for a prompt
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, DomainError>;

    /// Generate output intended to be a structured (JSON) object.
    ///
    /// The return value is raw text; the default implementation delegates to
    /// `generate` with a lower temperature.
    async fn generate_structured(&self, prompt: &str) -> Result<String, DomainError> {
        self.generate(prompt, &GenerationOptions::new(300, 0.5)).await
    }
}

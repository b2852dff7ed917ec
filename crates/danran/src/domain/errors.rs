//! Domain Errors
//!
//! Error types for domain operations.
//!
//! Propagation policy: only `InvalidRole`, `SessionNotActive`, `Conflict`,
//! `Validation`, and `Repository` surface to callers as hard failures.
//! `GenerationUnavailable` and `MalformedExtraction` are recovered locally by
//! the orchestrator - a failed persona simply contributes no turn, a failed
//! extraction produces no moment.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Session not active: {0}")]
    SessionNotActive(String),

    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Malformed extraction: {0}")]
    MalformedExtraction(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn invalid_role<T: AsRef<str>>(tag: T) -> Self {
        Self::InvalidRole(tag.as_ref().to_string())
    }

    pub fn session_not_active<T: AsRef<str>>(session_id: T) -> Self {
        Self::SessionNotActive(session_id.as_ref().to_string())
    }
}

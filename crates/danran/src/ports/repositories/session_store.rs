//! Session Store Port
//!
//! Abstract interface for per-session persistence. Every save fully
//! overwrites the corresponding artifact for that session - there are no
//! partial or merge semantics. Loads return the artifact or an empty default
//! when nothing was saved yet.

use async_trait::async_trait;

use crate::domain::entities::{ConversationTurn, HappyMoment, Persona, UserProfile};
use crate::domain::errors::DomainError;

/// Persistence interface for session artifacts
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite the persisted roster for a session
    async fn save_roster(&self, session_id: &str, personas: &[Persona])
        -> Result<(), DomainError>;

    /// Load the persisted roster, empty if never saved
    async fn load_roster(&self, session_id: &str) -> Result<Vec<Persona>, DomainError>;

    /// Overwrite the persisted conversation log for a session
    async fn save_log(&self, session_id: &str, turns: &[ConversationTurn])
        -> Result<(), DomainError>;

    /// Load the persisted log, empty if never saved
    async fn load_log(&self, session_id: &str) -> Result<Vec<ConversationTurn>, DomainError>;

    /// Overwrite the persisted happy moments for a session
    async fn save_moments(&self, session_id: &str, moments: &[HappyMoment])
        -> Result<(), DomainError>;

    /// Load the persisted moments, empty if never saved
    async fn load_moments(&self, session_id: &str) -> Result<Vec<HappyMoment>, DomainError>;

    /// Overwrite the persisted user profile for a session
    async fn save_profile(&self, session_id: &str, profile: &UserProfile)
        -> Result<(), DomainError>;

    /// Load the persisted profile, `None` if never saved
    async fn load_profile(&self, session_id: &str) -> Result<Option<UserProfile>, DomainError>;
}

//! Danran Domain Library
//!
//! Core domain types and interfaces for the Danran family conversation
//! orchestrator.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (RoleTemplate, Persona, ConversationLog, HappyMoment)
//!   - `value_objects/`: Immutable value types (FamilyRole, Emotion, Gender)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Session persistence interfaces
//!   - `services/`: External generation service interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use danran::domain::{FamilyRole, Persona, RoleTemplateRegistry};
//! use danran::ports::{GenerationService, SessionStore};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ChildInfo, ConversationLog, ConversationTurn, DomainError, Emotion, FamilyRole, FamilyScene,
    Gender, HappyMoment, PartnerInfo, Persona, PersonaOverrides, PersonaSnapshot, RoleTemplate,
    RoleTemplateRegistry, SpeakingStyle, UserProfile, CONTEXT_WINDOW_TURNS,
};
pub use ports::{GenerationOptions, GenerationService, SessionStore};

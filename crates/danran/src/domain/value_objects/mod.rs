//! Value Objects
//!
//! Immutable value types used across the domain.

pub mod emotion;
pub mod family_role;
pub mod gender;

pub use emotion::Emotion;
pub use family_role::FamilyRole;
pub use gender::Gender;

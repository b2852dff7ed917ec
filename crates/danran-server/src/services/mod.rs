//! Orchestrator Services

pub mod instantiator;
pub mod moments;
pub mod prompts;
pub mod responder;
pub mod roster;
pub mod scenes;
pub mod scheduler;
pub mod structured;

pub use instantiator::PersonaInstantiator;
pub use moments::{MomentExtractor, MomentOutcome, SkipReason};
pub use scenes::SceneComposer;
pub use responder::{PersonaReply, Responder};
pub use roster::{determine_roles, FamilyRoster, RoleSpec};
pub use scheduler::{MessageNeeds, TurnScheduler};

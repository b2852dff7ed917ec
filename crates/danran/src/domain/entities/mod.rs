//! Domain Entities

pub mod moment;
pub mod persona;
pub mod profile;
pub mod template;
pub mod turn;

pub use moment::{FamilyScene, HappyMoment};
pub use persona::{Exchange, Persona, PersonaOverrides, PersonaSnapshot, PERSONA_HISTORY_CAP};
pub use profile::{ChildInfo, PartnerInfo, UserProfile};
pub use template::{RoleTemplate, RoleTemplateRegistry, SpeakingStyle};
pub use turn::{ConversationLog, ConversationTurn, CONTEXT_WINDOW_TURNS, USER_SPEAKER};

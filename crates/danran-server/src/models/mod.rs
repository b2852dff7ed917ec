//! Request/Response DTOs for the HTTP surface

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use danran::domain::{
    ConversationTurn, FamilyScene, HappyMoment, Persona, PersonaOverrides, UserProfile,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Start (or restart) a session
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub session_id: String,
    /// User profile; when omitted, the persisted profile is loaded
    #[schema(value_type = Option<Object>)]
    pub profile: Option<UserProfile>,
}

/// Session started, with any greeting turns
#[derive(Debug, Serialize, ToSchema)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub members: Vec<PersonaResponse>,
    pub greetings: Vec<TurnResponse>,
}

/// Send one user message
#[derive(Debug, Deserialize, ToSchema)]
pub struct MessageRequest {
    pub session_id: String,
    pub message: String,
}

/// Committed persona turns for one round, in priority order
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub session_id: String,
    pub responses: Vec<TurnResponse>,
    /// Current emotion per member after the round
    pub member_emotions: HashMap<String, String>,
}

/// One logged turn
#[derive(Debug, Serialize, ToSchema)]
pub struct TurnResponse {
    pub speaker: String,
    pub message: String,
    pub emotion: String,
    pub role: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<&ConversationTurn> for TurnResponse {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            speaker: turn.speaker.clone(),
            message: turn.message.clone(),
            emotion: turn.emotion.to_string(),
            role: turn.role.map(|r| r.to_string()),
            timestamp: turn.timestamp,
        }
    }
}

/// One active family member
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonaResponse {
    pub name: String,
    pub role: String,
    pub age: u32,
    pub personality_traits: Vec<String>,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub current_emotion: String,
    pub relationship_to_user: String,
}

impl From<&Persona> for PersonaResponse {
    fn from(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            role: persona.role.to_string(),
            age: persona.age,
            personality_traits: persona.personality_traits.clone(),
            interests: persona.interests.clone(),
            values: persona.values.clone(),
            current_emotion: persona.current_emotion.to_string(),
            relationship_to_user: persona.relationship_to_user.clone(),
        }
    }
}

/// Add a family member to the live roster
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    /// Role tag (partner, child, grandfather, grandmother, sibling, pet)
    pub role: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub overrides: Option<PersonaOverrides>,
}

/// Removal outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveMemberResponse {
    pub removed: bool,
}

/// Profile of a session
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub session_id: String,
    #[schema(value_type = Object)]
    pub profile: UserProfile,
}

/// One extracted happy moment
#[derive(Debug, Serialize, ToSchema)]
pub struct MomentResponse {
    pub activity: String,
    pub description: String,
    pub emotions: Vec<String>,
    pub participants: Vec<String>,
    pub setting: String,
    pub created_at: DateTime<Utc>,
    pub role_interactions: HashMap<String, String>,
}

impl From<&HappyMoment> for MomentResponse {
    fn from(moment: &HappyMoment) -> Self {
        Self {
            activity: moment.activity.clone(),
            description: moment.description.clone(),
            emotions: moment.emotions.clone(),
            participants: moment.participants.clone(),
            setting: moment.setting.clone(),
            created_at: moment.created_at,
            role_interactions: moment
                .role_interactions
                .iter()
                .map(|(role, message)| (role.to_string(), message.clone()))
                .collect(),
        }
    }
}

/// Scene rendering of the latest happy moment
#[derive(Debug, Serialize, ToSchema)]
pub struct SceneResponse {
    pub session_id: String,
    /// `None` until a moment has been extracted
    pub scene: Option<SceneDetail>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SceneDetail {
    pub scene: String,
    pub description: String,
    pub emotions: Vec<String>,
    pub role_interactions: HashMap<String, String>,
}

impl From<&FamilyScene> for SceneDetail {
    fn from(scene: &FamilyScene) -> Self {
        Self {
            scene: scene.scene.clone(),
            description: scene.description.clone(),
            emotions: scene.emotions.clone(),
            role_interactions: scene
                .role_interactions
                .iter()
                .map(|(role, message)| (role.to_string(), message.clone()))
                .collect(),
        }
    }
}

/// Session ended
#[derive(Debug, Serialize, ToSchema)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub status: String,
}

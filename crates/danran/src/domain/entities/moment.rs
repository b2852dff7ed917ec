//! HappyMoment - Structured summary of a turn's shared positive content
//!
//! Appended to a per-session list by the moment extractor; never mutated or
//! deleted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FamilyRole;

/// Narrative rendering of a happy moment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyScene {
    pub scene: String,
    pub description: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub role_interactions: HashMap<FamilyRole, String>,
}

/// A shared-moment record extracted from one conversation round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HappyMoment {
    pub activity: String,
    pub description: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub setting: String,
    pub created_at: DateTime<Utc>,
    /// What each role contributed during the triggering turn
    #[serde(default)]
    pub role_interactions: HashMap<FamilyRole, String>,
}

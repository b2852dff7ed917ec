//! UserProfile - Profile data the roster policy and instantiation draw from

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Gender;

/// Partner information from a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerInfo {
    pub name: Option<String>,
    pub age: Option<u32>,
}

/// One child entry from a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildInfo {
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub personality: Vec<String>,
}

/// User profile driving family configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Free-form lifestyle attributes, passed through to prompts as-is
    #[serde(default)]
    pub lifestyle: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_info: Option<PartnerInfo>,
    #[serde(default)]
    pub children_info: Vec<ChildInfo>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: None,
            gender: Gender::Unknown,
            interests: Vec::new(),
            lifestyle: serde_json::Value::Null,
            partner_info: None,
            children_info: Vec::new(),
        }
    }
}

//! FamilyRole - Closed enumeration of family member archetypes
//!
//! Role tags are a closed set resolved through a single template table
//! (`RoleTemplateRegistry`), never compared as ad-hoc strings.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Family member role tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Partner,
    Child,
    Grandfather,
    Grandmother,
    Sibling,
    Pet,
}

impl FamilyRole {
    /// All role tags, in catalog order
    pub const ALL: [FamilyRole; 6] = [
        FamilyRole::Partner,
        FamilyRole::Child,
        FamilyRole::Grandfather,
        FamilyRole::Grandmother,
        FamilyRole::Sibling,
        FamilyRole::Pet,
    ];
}

impl std::fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FamilyRole::Partner => write!(f, "partner"),
            FamilyRole::Child => write!(f, "child"),
            FamilyRole::Grandfather => write!(f, "grandfather"),
            FamilyRole::Grandmother => write!(f, "grandmother"),
            FamilyRole::Sibling => write!(f, "sibling"),
            FamilyRole::Pet => write!(f, "pet"),
        }
    }
}

impl std::str::FromStr for FamilyRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "partner" => Ok(FamilyRole::Partner),
            "child" => Ok(FamilyRole::Child),
            "grandfather" => Ok(FamilyRole::Grandfather),
            "grandmother" => Ok(FamilyRole::Grandmother),
            "sibling" => Ok(FamilyRole::Sibling),
            "pet" => Ok(FamilyRole::Pet),
            _ => Err(DomainError::invalid_role(s)),
        }
    }
}

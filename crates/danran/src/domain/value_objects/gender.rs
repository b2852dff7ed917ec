//! Gender - Binary gender field with explicit unknown fallback

use serde::{Deserialize, Serialize};

/// Gender of a profile entry (used for child name selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

//! Persona - Concrete, named family-member agent instance
//!
//! Construction is pure: template defaults, profile-derived values, and
//! explicit overrides are merged with priority override > profile-derived >
//! template default. Any generation-backed "flavoring" of the trait list
//! happens outside the domain layer and must fall back to these defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::profile::UserProfile;
use crate::domain::entities::template::{RoleTemplate, SpeakingStyle};
use crate::domain::value_objects::{Emotion, FamilyRole, Gender};

/// Maximum exchanges retained in a persona's private history
pub const PERSONA_HISTORY_CAP: usize = 20;

/// Optional per-instance overrides applied at instantiation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonaOverrides {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub personality_traits: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub values: Option<Vec<String>>,
}

impl PersonaOverrides {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.personality_traits.is_none()
            && self.interests.is_none()
            && self.values.is_none()
    }
}

/// One remembered user/persona exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub user_message: String,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}

/// Denormalized persona attributes captured at time of speaking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSnapshot {
    pub name: String,
    pub role: FamilyRole,
    pub age: u32,
    pub personality_traits: Vec<String>,
    pub speaking_style: SpeakingStyle,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub current_emotion: Emotion,
    pub relationship_to_user: String,
}

/// A family member agent with mutable emotion state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub role: FamilyRole,
    pub age: u32,
    pub personality_traits: Vec<String>,
    pub speaking_style: SpeakingStyle,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub relationship_to_user: String,
    pub current_emotion: Emotion,
    #[serde(default)]
    pub history: Vec<Exchange>,
}

impl Persona {
    /// Build a persona from a role template, a user profile, and overrides.
    ///
    /// Merge priority: override > profile-derived > template default.
    pub fn instantiate(
        template: &RoleTemplate,
        profile: &UserProfile,
        overrides: &PersonaOverrides,
    ) -> Self {
        let age = derive_age(template.role, profile, overrides);
        let gender = overrides.gender.unwrap_or(profile.gender);

        let bucket = match template.role {
            FamilyRole::Child => Some(ChildBucket::for_age(age)),
            _ => None,
        };

        let name = overrides
            .name
            .clone()
            .or_else(|| derive_name(template, profile, bucket, gender));
        let name = name.unwrap_or_else(|| template.display_name.clone());

        let personality_traits = overrides
            .personality_traits
            .clone()
            .filter(|traits| !traits.is_empty())
            .or_else(|| bucket.map(|b| b.traits()))
            .unwrap_or_else(|| template.personality_traits.clone());

        let interests = overrides
            .interests
            .clone()
            .filter(|interests| !interests.is_empty())
            .or_else(|| bucket.map(|b| b.interests()))
            .unwrap_or_else(|| template.interests.clone());

        let values = overrides
            .values
            .clone()
            .filter(|values| !values.is_empty())
            .unwrap_or_else(|| template.values.clone());

        let speaking_style = match bucket {
            Some(b) => SpeakingStyle {
                tone: b.tone().to_string(),
                ..template.speaking_style.clone()
            },
            None => template.speaking_style.clone(),
        };

        Self {
            name,
            role: template.role,
            age,
            personality_traits,
            speaking_style,
            interests,
            values,
            relationship_to_user: template.relationship.clone(),
            current_emotion: Emotion::Neutral,
            history: Vec::new(),
        }
    }

    /// Record one exchange, dropping the oldest past the cap
    pub fn record_exchange(&mut self, user_message: &str, reply: &str) {
        self.history.push(Exchange {
            user_message: user_message.to_string(),
            reply: reply.to_string(),
            timestamp: Utc::now(),
        });
        if self.history.len() > PERSONA_HISTORY_CAP {
            let excess = self.history.len() - PERSONA_HISTORY_CAP;
            self.history.drain(..excess);
        }
    }

    pub fn snapshot(&self) -> PersonaSnapshot {
        PersonaSnapshot {
            name: self.name.clone(),
            role: self.role,
            age: self.age,
            personality_traits: self.personality_traits.clone(),
            speaking_style: self.speaking_style.clone(),
            interests: self.interests.clone(),
            values: self.values.clone(),
            current_emotion: self.current_emotion,
            relationship_to_user: self.relationship_to_user.clone(),
        }
    }
}

fn derive_age(role: FamilyRole, profile: &UserProfile, overrides: &PersonaOverrides) -> u32 {
    if let Some(age) = overrides.age {
        return age;
    }
    match role {
        FamilyRole::Partner => profile
            .partner_info
            .as_ref()
            .and_then(|p| p.age)
            .or(profile.age)
            .unwrap_or(28),
        FamilyRole::Child => 5,
        FamilyRole::Grandfather => 65,
        FamilyRole::Grandmother => 62,
        _ => 30,
    }
}

fn derive_name(
    template: &RoleTemplate,
    profile: &UserProfile,
    bucket: Option<ChildBucket>,
    gender: Gender,
) -> Option<String> {
    match template.role {
        FamilyRole::Partner => Some(
            profile
                .partner_info
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| "美咲".to_string()),
        ),
        FamilyRole::Child => bucket.map(|b| b.name(gender).to_string()),
        FamilyRole::Grandfather => Some("じいじ".to_string()),
        FamilyRole::Grandmother => Some("ばあば".to_string()),
        _ => None,
    }
}

/// Age-banded defaults for child personas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildBucket {
    /// age < 7
    Young,
    /// 7 <= age < 13
    Middle,
    /// age >= 13
    Teen,
}

impl ChildBucket {
    fn for_age(age: u32) -> Self {
        if age < 7 {
            ChildBucket::Young
        } else if age < 13 {
            ChildBucket::Middle
        } else {
            ChildBucket::Teen
        }
    }

    fn name(self, gender: Gender) -> &'static str {
        match (self, gender) {
            (ChildBucket::Young, Gender::Male) => "たろう",
            (ChildBucket::Young, Gender::Female) => "さくら",
            (ChildBucket::Young, Gender::Unknown) => "さくら",
            (ChildBucket::Middle, Gender::Male) => "ゆうと",
            (ChildBucket::Middle, Gender::Female) => "みお",
            (ChildBucket::Middle, Gender::Unknown) => "みお",
            (ChildBucket::Teen, Gender::Male) => "そうた",
            (ChildBucket::Teen, Gender::Female) => "あい",
            (ChildBucket::Teen, Gender::Unknown) => "あい",
        }
    }

    fn tone(self) -> &'static str {
        match self {
            ChildBucket::Young => "あどけない",
            ChildBucket::Middle => "元気いっぱい",
            ChildBucket::Teen => "少し大人びた",
        }
    }

    fn traits(self) -> Vec<String> {
        let traits: &[&str] = match self {
            ChildBucket::Young => &["甘えん坊", "好奇心旺盛", "素直"],
            ChildBucket::Middle => &["活発", "友達思い", "負けず嫌い"],
            ChildBucket::Teen => &["思慮深い", "少し照れ屋", "家族思い"],
        };
        traits.iter().map(|s| s.to_string()).collect()
    }

    fn interests(self) -> Vec<String> {
        let interests: &[&str] = match self {
            ChildBucket::Young => &["お絵かき", "公園", "絵本"],
            ChildBucket::Middle => &["ゲーム", "サッカー", "友達"],
            ChildBucket::Teen => &["音楽", "部活", "スマホ"],
        };
        interests.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::profile::{ChildInfo, PartnerInfo};
    use crate::domain::entities::template::RoleTemplateRegistry;

    fn profile_with_partner() -> UserProfile {
        UserProfile {
            age: Some(28),
            partner_info: Some(PartnerInfo {
                name: Some("美咲".to_string()),
                age: Some(26),
            }),
            children_info: vec![ChildInfo {
                age: 5,
                gender: Gender::Male,
                personality: vec![],
            }],
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_partner_uses_profile_name_and_age() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Partner).unwrap();
        let persona =
            Persona::instantiate(template, &profile_with_partner(), &PersonaOverrides::default());
        assert_eq!(persona.name, "美咲");
        assert_eq!(persona.age, 26);
        assert_eq!(persona.current_emotion, Emotion::Neutral);
    }

    #[test]
    fn test_partner_age_falls_back_to_profile_age() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Partner).unwrap();
        let mut profile = profile_with_partner();
        profile.partner_info = Some(PartnerInfo {
            name: None,
            age: None,
        });
        let persona = Persona::instantiate(template, &profile, &PersonaOverrides::default());
        assert_eq!(persona.age, 28);
        assert_eq!(persona.name, "美咲");
    }

    #[test]
    fn test_child_buckets_by_age_and_gender() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Child).unwrap();
        let profile = UserProfile::default();

        let cases = [
            (5, Gender::Male, "たろう"),
            (5, Gender::Unknown, "さくら"),
            (9, Gender::Male, "ゆうと"),
            (9, Gender::Female, "みお"),
            (14, Gender::Male, "そうた"),
            (16, Gender::Female, "あい"),
        ];
        for (age, gender, expected) in cases {
            let overrides = PersonaOverrides {
                age: Some(age),
                gender: Some(gender),
                ..PersonaOverrides::default()
            };
            let persona = Persona::instantiate(template, &profile, &overrides);
            assert_eq!(persona.name, expected, "age {} gender {:?}", age, gender);
            assert_eq!(persona.age, age);
        }
    }

    #[test]
    fn test_child_bucket_tone_differs_per_band() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Child).unwrap();
        let profile = UserProfile::default();

        let young = Persona::instantiate(
            template,
            &profile,
            &PersonaOverrides {
                age: Some(4),
                ..PersonaOverrides::default()
            },
        );
        let teen = Persona::instantiate(
            template,
            &profile,
            &PersonaOverrides {
                age: Some(15),
                ..PersonaOverrides::default()
            },
        );
        assert_ne!(young.speaking_style.tone, teen.speaking_style.tone);
        assert_ne!(young.interests, teen.interests);
    }

    #[test]
    fn test_overrides_win_over_bucket_and_template() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Child).unwrap();
        let overrides = PersonaOverrides {
            name: Some("はな".to_string()),
            age: Some(6),
            personality_traits: Some(vec!["おっとり".to_string()]),
            interests: Some(vec!["ピアノ".to_string()]),
            ..PersonaOverrides::default()
        };
        let persona = Persona::instantiate(template, &UserProfile::default(), &overrides);
        assert_eq!(persona.name, "はな");
        assert_eq!(persona.personality_traits, vec!["おっとり".to_string()]);
        assert_eq!(persona.interests, vec!["ピアノ".to_string()]);
    }

    #[test]
    fn test_grandparents_have_fixed_names() {
        let registry = RoleTemplateRegistry::new();
        let profile = UserProfile::default();
        let grandfather = Persona::instantiate(
            registry.get(FamilyRole::Grandfather).unwrap(),
            &profile,
            &PersonaOverrides::default(),
        );
        let grandmother = Persona::instantiate(
            registry.get(FamilyRole::Grandmother).unwrap(),
            &profile,
            &PersonaOverrides::default(),
        );
        assert_eq!(grandfather.name, "じいじ");
        assert_eq!(grandfather.age, 65);
        assert_eq!(grandmother.name, "ばあば");
        assert_eq!(grandmother.age, 62);
    }

    #[test]
    fn test_history_is_bounded() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Partner).unwrap();
        let mut persona =
            Persona::instantiate(template, &UserProfile::default(), &PersonaOverrides::default());
        for i in 0..(PERSONA_HISTORY_CAP + 5) {
            persona.record_exchange(&format!("message {}", i), "reply");
        }
        assert_eq!(persona.history.len(), PERSONA_HISTORY_CAP);
        assert_eq!(persona.history[0].user_message, "message 5");
    }
}

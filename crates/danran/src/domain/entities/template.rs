//! RoleTemplate - Immutable archetype defaults per family role
//!
//! The registry is the single resolution table from role tag to template,
//! built once at startup and exhaustive over `FamilyRole`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::FamilyRole;

/// Speaking style defaults for a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingStyle {
    pub tone: String,
    pub vocabulary: String,
    pub emotions: Vec<String>,
}

impl SpeakingStyle {
    fn new(tone: &str, vocabulary: &str, emotions: &[&str]) -> Self {
        Self {
            tone: tone.to_string(),
            vocabulary: vocabulary.to_string(),
            emotions: strings(emotions),
        }
    }
}

/// Immutable role archetype, loaded once at process start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTemplate {
    pub role: FamilyRole,
    pub display_name: String,
    pub age_range: (u32, u32),
    pub personality_traits: Vec<String>,
    pub speaking_style: SpeakingStyle,
    pub interests: Vec<String>,
    pub values: Vec<String>,
    pub relationship: String,
    pub default_emotions: Vec<String>,
}

/// Static catalog of role archetypes
#[derive(Debug, Clone)]
pub struct RoleTemplateRegistry {
    templates: HashMap<FamilyRole, RoleTemplate>,
}

impl RoleTemplateRegistry {
    pub fn new() -> Self {
        let mut templates = HashMap::new();

        templates.insert(
            FamilyRole::Partner,
            RoleTemplate {
                role: FamilyRole::Partner,
                display_name: "パートナー".to_string(),
                age_range: (20, 50),
                personality_traits: strings(&["愛情深い", "支え合い", "理解力", "協調性"]),
                speaking_style: SpeakingStyle::new(
                    "温かみのある",
                    "親しみやすい",
                    &["愛情", "支え合い", "理解"],
                ),
                interests: strings(&["家族時間", "趣味", "旅行", "料理"]),
                values: strings(&["家族の絆", "健康", "成長", "愛情"]),
                relationship: "パートナー".to_string(),
                default_emotions: strings(&["loving", "supportive", "understanding"]),
            },
        );

        templates.insert(
            FamilyRole::Child,
            RoleTemplate {
                role: FamilyRole::Child,
                display_name: "子ども".to_string(),
                age_range: (0, 18),
                personality_traits: strings(&["好奇心旺盛", "純真", "成長中", "家族思い"]),
                speaking_style: SpeakingStyle::new(
                    "年齢に応じた",
                    "年齢相応",
                    &["純真", "喜び", "驚き", "成長"],
                ),
                interests: strings(&["遊び", "学習", "友達", "家族"]),
                values: strings(&["楽しさ", "好奇心", "家族", "友達"]),
                relationship: "子ども".to_string(),
                default_emotions: strings(&["happy", "curious", "excited"]),
            },
        );

        templates.insert(
            FamilyRole::Grandfather,
            RoleTemplate {
                role: FamilyRole::Grandfather,
                display_name: "祖父".to_string(),
                age_range: (60, 80),
                personality_traits: strings(&["穏やか", "経験豊富", "家族思い", "知恵深い"]),
                speaking_style: SpeakingStyle::new(
                    "落ち着いた",
                    "丁寧語",
                    &["慈愛", "安心感", "誇り"],
                ),
                interests: strings(&["園芸", "将棋", "散歩", "読書"]),
                values: strings(&["伝統", "家族の絆", "知恵", "健康"]),
                relationship: "祖父".to_string(),
                default_emotions: strings(&["wise", "caring", "proud"]),
            },
        );

        templates.insert(
            FamilyRole::Grandmother,
            RoleTemplate {
                role: FamilyRole::Grandmother,
                display_name: "祖母".to_string(),
                age_range: (55, 75),
                personality_traits: strings(&["優しい", "料理好き", "孫思い", "愛情深い"]),
                speaking_style: SpeakingStyle::new(
                    "温かみのある",
                    "優しい言葉",
                    &["愛情", "心配", "喜び"],
                ),
                interests: strings(&["料理", "裁縫", "お花", "孫との時間"]),
                values: strings(&["家族の健康", "伝統", "愛情", "絆"]),
                relationship: "祖母".to_string(),
                default_emotions: strings(&["loving", "caring", "nurturing"]),
            },
        );

        templates.insert(
            FamilyRole::Sibling,
            RoleTemplate {
                role: FamilyRole::Sibling,
                display_name: "きょうだい".to_string(),
                age_range: (15, 40),
                personality_traits: strings(&["気さく", "率直", "頼れる", "遊び心"]),
                speaking_style: SpeakingStyle::new(
                    "くだけた",
                    "タメ口",
                    &["親しみ", "冗談", "共感"],
                ),
                interests: strings(&["音楽", "スポーツ", "ゲーム", "外食"]),
                values: strings(&["正直", "友情", "家族", "自由"]),
                relationship: "きょうだい".to_string(),
                default_emotions: strings(&["happy", "excited", "calm"]),
            },
        );

        templates.insert(
            FamilyRole::Pet,
            RoleTemplate {
                role: FamilyRole::Pet,
                display_name: "ペット".to_string(),
                age_range: (0, 15),
                personality_traits: strings(&["人懐っこい", "無邪気", "甘えん坊", "元気"]),
                speaking_style: SpeakingStyle::new(
                    "無邪気な",
                    "短い言葉",
                    &["喜び", "甘え", "好奇心"],
                ),
                interests: strings(&["散歩", "おやつ", "昼寝", "遊び"]),
                values: strings(&["家族", "ごはん", "遊び"]),
                relationship: "ペット".to_string(),
                default_emotions: strings(&["happy", "excited", "curious"]),
            },
        );

        Self { templates }
    }

    /// Resolve a role tag to its template
    pub fn get(&self, role: FamilyRole) -> Result<&RoleTemplate, DomainError> {
        self.templates
            .get(&role)
            .ok_or_else(|| DomainError::invalid_role(role.to_string()))
    }

    pub fn roles(&self) -> impl Iterator<Item = FamilyRole> + '_ {
        self.templates.keys().copied()
    }
}

impl Default for RoleTemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_roles() {
        let registry = RoleTemplateRegistry::new();
        for role in FamilyRole::ALL {
            assert!(registry.get(role).is_ok(), "missing template for {}", role);
        }
    }

    #[test]
    fn test_template_matches_role_tag() {
        let registry = RoleTemplateRegistry::new();
        let template = registry.get(FamilyRole::Grandfather).unwrap();
        assert_eq!(template.role, FamilyRole::Grandfather);
        assert_eq!(template.display_name, "祖父");
    }
}

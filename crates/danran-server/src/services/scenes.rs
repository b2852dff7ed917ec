//! Scene Composer - Narrative rendering of the latest happy moment
//!
//! Like moment extraction this is an enrichment: generation or parse failure
//! falls back to a scene assembled from the moment itself, never an error.

use std::sync::Arc;

use danran::domain::{FamilyScene, HappyMoment};
use danran::ports::{GenerationOptions, GenerationService};

use crate::services::prompts;
use crate::services::structured::{extract_json_object, string_field, string_list_field};

const DEFAULT_SCENE: &str = "家族の温かい時間";

/// Renders the latest happy moment into a `FamilyScene`
pub struct SceneComposer {
    generation: Arc<dyn GenerationService>,
}

impl SceneComposer {
    pub fn new(generation: Arc<dyn GenerationService>) -> Self {
        Self { generation }
    }

    /// Compose a scene from the latest moment; `None` when no moment exists.
    ///
    /// The generated payload is parsed leniently; missing or unusable fields
    /// fall back to the moment's own values.
    pub async fn compose(&self, moments: &[HappyMoment]) -> Option<FamilyScene> {
        let latest = moments.last()?;

        let prompt = prompts::scene_prompt(latest);
        let options = GenerationOptions::new(500, 0.7);
        let parsed = match self.generation.generate(&prompt, &options).await {
            Ok(raw) => extract_json_object(&raw),
            Err(e) => {
                tracing::debug!("scene generation failed, using fallback: {}", e);
                None
            }
        };

        Some(match parsed {
            Some(value) => FamilyScene {
                scene: non_empty_or(string_field(&value, "scene"), DEFAULT_SCENE),
                description: non_empty_or(
                    string_field(&value, "description"),
                    &latest.description,
                ),
                emotions: {
                    let emotions = string_list_field(&value, "emotions");
                    if emotions.is_empty() {
                        latest.emotions.clone()
                    } else {
                        emotions
                    }
                },
                role_interactions: latest.role_interactions.clone(),
            },
            None => FamilyScene {
                scene: DEFAULT_SCENE.to_string(),
                description: latest.description.clone(),
                emotions: latest.emotions.clone(),
                role_interactions: latest.role_interactions.clone(),
            },
        })
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::Utc;
    use danran::domain::FamilyRole;

    use crate::test_support::ScriptedGeneration;

    fn moment() -> HappyMoment {
        HappyMoment {
            activity: "朝の団欒".to_string(),
            description: "みんなで朝ごはん".to_string(),
            emotions: vec!["happy".to_string()],
            participants: vec!["美咲".to_string()],
            setting: "リビング".to_string(),
            created_at: Utc::now(),
            role_interactions: HashMap::from([(
                FamilyRole::Partner,
                "おはよう、今日は何をする？".to_string(),
            )]),
        }
    }

    fn composer(generation: ScriptedGeneration) -> SceneComposer {
        SceneComposer::new(Arc::new(generation))
    }

    #[tokio::test]
    async fn test_no_moments_no_scene() {
        let scene = composer(ScriptedGeneration::new()).compose(&[]).await;
        assert!(scene.is_none());
    }

    #[tokio::test]
    async fn test_composes_parsed_scene() {
        let generation = ScriptedGeneration::new().reply_containing(
            "シーンを詳細に",
            r#"{"scene": "朝日の差すリビング", "description": "湯気の立つ味噌汁を囲む", "emotions": ["calm"]}"#,
        );
        let scene = composer(generation).compose(&[moment()]).await.unwrap();
        assert_eq!(scene.scene, "朝日の差すリビング");
        assert_eq!(scene.description, "湯気の立つ味噌汁を囲む");
        assert_eq!(scene.emotions, vec!["calm".to_string()]);
        assert_eq!(scene.role_interactions.len(), 1);
    }

    #[tokio::test]
    async fn test_non_json_output_falls_back_to_moment() {
        let generation = ScriptedGeneration::new()
            .reply_containing("シーンを詳細に", "とても温かい情景でした。");
        let scene = composer(generation).compose(&[moment()]).await.unwrap();
        assert_eq!(scene.scene, DEFAULT_SCENE);
        assert_eq!(scene.description, "みんなで朝ごはん");
        assert_eq!(scene.emotions, vec!["happy".to_string()]);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back_to_moment() {
        let generation = ScriptedGeneration::new().fail_containing("シーンを詳細に");
        let scene = composer(generation).compose(&[moment()]).await.unwrap();
        assert_eq!(scene.scene, DEFAULT_SCENE);
        assert_eq!(scene.description, "みんなで朝ごはん");
    }

    #[tokio::test]
    async fn test_latest_moment_wins() {
        let mut second = moment();
        second.description = "夕方の散歩".to_string();
        let generation = ScriptedGeneration::new()
            .reply_containing("シーンを詳細に", "JSONなし");
        let scene = composer(generation)
            .compose(&[moment(), second])
            .await
            .unwrap();
        assert_eq!(scene.description, "夕方の散歩");
    }
}

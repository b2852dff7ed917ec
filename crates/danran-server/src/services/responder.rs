//! Responder - Per-persona generation against a frozen context snapshot
//!
//! All selected personas are dispatched concurrently; the context window is
//! rendered once per turn, so later-completing personas never see earlier
//! completions from the same round. Results come back in dispatch order,
//! which is the scheduler's priority order - arrival order is irrelevant.
//! A failed or timed-out persona yields `None` and contributes no turn.

use std::sync::Arc;
use std::time::Duration;

use danran::domain::{ConversationTurn, Emotion, Persona};
use danran::ports::{GenerationOptions, GenerationService};
use futures::future::join_all;

use crate::services::prompts;

/// One persona's generated contribution for a round
#[derive(Debug, Clone)]
pub struct PersonaReply {
    pub persona_name: String,
    pub text: String,
    /// Newly classified emotion; `None` retains the previous value
    pub emotion: Option<Emotion>,
}

/// Dispatches generation calls for scheduled personas
pub struct Responder {
    generation: Arc<dyn GenerationService>,
    deadline: Duration,
}

impl Responder {
    pub fn new(generation: Arc<dyn GenerationService>, deadline: Duration) -> Self {
        Self {
            generation,
            deadline,
        }
    }

    /// Generate replies for all scheduled personas, in the given order.
    ///
    /// The returned vector is index-aligned with `ordered`; `None` marks a
    /// persona whose generation failed or exceeded the turn deadline.
    pub async fn respond_all(
        &self,
        ordered: &[Persona],
        user_message: &str,
        window: &[ConversationTurn],
    ) -> Vec<Option<PersonaReply>> {
        // Snapshot taken once per turn, shared by every persona call
        let context = prompts::render_context(window);

        let calls = ordered
            .iter()
            .map(|persona| self.respond_one(persona, user_message, &context));
        join_all(calls).await
    }

    async fn respond_one(
        &self,
        persona: &Persona,
        user_message: &str,
        context: &str,
    ) -> Option<PersonaReply> {
        let prompt = prompts::response_prompt(persona, user_message, context);
        let options = GenerationOptions::default();

        let text = match tokio::time::timeout(
            self.deadline,
            self.generation.generate(&prompt, &options),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(persona = %persona.name, "response generation failed: {}", e);
                return None;
            }
            Err(_) => {
                tracing::warn!(persona = %persona.name, "response generation timed out");
                return None;
            }
        };

        let emotion = self.classify_emotion(persona, user_message, &text).await;

        Some(PersonaReply {
            persona_name: persona.name.clone(),
            text,
            emotion,
        })
    }

    /// Classify the persona's emotion after a reply; failure keeps the
    /// previous emotion (never blocks the turn).
    async fn classify_emotion(
        &self,
        persona: &Persona,
        user_message: &str,
        reply: &str,
    ) -> Option<Emotion> {
        let prompt = prompts::emotion_prompt(persona, user_message, reply);
        let options = GenerationOptions::new(50, 0.3);

        let raw = match tokio::time::timeout(
            self.deadline,
            self.generation.generate(&prompt, &options),
        )
        .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::debug!(persona = %persona.name, "emotion classification failed: {}", e);
                return None;
            }
            Err(_) => {
                tracing::debug!(persona = %persona.name, "emotion classification timed out");
                return None;
            }
        };

        let parsed = Emotion::parse_lenient(&raw);
        if parsed.is_none() {
            tracing::debug!(persona = %persona.name, raw = %raw, "unrecognized emotion label");
        }
        parsed
    }

    /// Generate one greeting per persona at session start.
    ///
    /// Greetings are not scheduled or prioritized; personas that fail simply
    /// greet nothing. Emotion is fixed to happy.
    pub async fn greet_all(&self, personas: &[Persona]) -> Vec<Option<PersonaReply>> {
        let calls = personas.iter().map(|persona| async move {
            let prompt = prompts::greeting_prompt(persona);
            let options = GenerationOptions::new(150, 0.8);
            match tokio::time::timeout(
                self.deadline,
                self.generation.generate(&prompt, &options),
            )
            .await
            {
                Ok(Ok(text)) => Some(PersonaReply {
                    persona_name: persona.name.clone(),
                    text,
                    emotion: Some(Emotion::Happy),
                }),
                Ok(Err(e)) => {
                    tracing::warn!(persona = %persona.name, "greeting failed: {}", e);
                    None
                }
                Err(_) => {
                    tracing::warn!(persona = %persona.name, "greeting timed out");
                    None
                }
            }
        });
        join_all(calls).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use danran::domain::{
        FamilyRole, PersonaOverrides, RoleTemplateRegistry, UserProfile,
    };

    use crate::test_support::ScriptedGeneration;

    fn personas(roles: &[FamilyRole]) -> Vec<Persona> {
        let registry = RoleTemplateRegistry::new();
        let profile = UserProfile::default();
        roles
            .iter()
            .map(|role| {
                Persona::instantiate(
                    registry.get(*role).unwrap(),
                    &profile,
                    &PersonaOverrides::default(),
                )
            })
            .collect()
    }

    fn responder(generation: ScriptedGeneration) -> Responder {
        Responder::new(Arc::new(generation), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_replies_in_order() {
        // Grandfather's response generation fails; partner and child still
        // reply, in dispatch order.
        let roster = personas(&[
            FamilyRole::Partner,
            FamilyRole::Child,
            FamilyRole::Grandfather,
        ]);
        let generation = ScriptedGeneration::new()
            .fail_containing("あなたはじいじ")
            .reply_containing("選択してください", "happy");
        let replies = responder(generation)
            .respond_all(&roster, "今日は公園に行ったよ", &[])
            .await;

        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].as_ref().unwrap().persona_name, "美咲");
        assert_eq!(replies[1].as_ref().unwrap().persona_name, "さくら");
        assert!(replies[2].is_none());
    }

    #[tokio::test]
    async fn test_emotion_label_parsed_from_reply() {
        let roster = personas(&[FamilyRole::Partner]);
        let generation =
            ScriptedGeneration::new().reply_containing("選択してください", "nostalgic (懐かしい)");
        let replies = responder(generation)
            .respond_all(&roster, "昔の話をしよう", &[])
            .await;
        assert_eq!(
            replies[0].as_ref().unwrap().emotion,
            Some(Emotion::Nostalgic)
        );
    }

    #[tokio::test]
    async fn test_emotion_failure_does_not_drop_reply() {
        let roster = personas(&[FamilyRole::Partner]);
        let generation = ScriptedGeneration::new().fail_containing("感情を以下のいずれか");
        let replies = responder(generation)
            .respond_all(&roster, "ただいま", &[])
            .await;

        let reply = replies[0].as_ref().unwrap();
        assert!(!reply.text.is_empty());
        assert_eq!(reply.emotion, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_persona_contributes_no_turn() {
        // Grandfather's generation never returns; the deadline elapses and
        // only his slot is empty.
        let roster = personas(&[
            FamilyRole::Partner,
            FamilyRole::Child,
            FamilyRole::Grandfather,
        ]);
        let generation = ScriptedGeneration::new().stall_containing("あなたはじいじ");
        let replies = Responder::new(Arc::new(generation), Duration::from_millis(100))
            .respond_all(&roster, "ただいま", &[])
            .await;

        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].as_ref().unwrap().persona_name, "美咲");
        assert_eq!(replies[1].as_ref().unwrap().persona_name, "さくら");
        assert!(replies[2].is_none());
    }

    #[tokio::test]
    async fn test_greetings_fixed_happy() {
        let roster = personas(&[FamilyRole::Grandmother]);
        let replies = responder(ScriptedGeneration::new()).greet_all(&roster).await;
        assert_eq!(replies[0].as_ref().unwrap().emotion, Some(Emotion::Happy));
    }
}

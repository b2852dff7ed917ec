//! Moment Extractor - Shared-moment records from completed rounds
//!
//! Extraction is an enrichment, never a correctness-critical path: generation
//! or parse failure produces a typed skip, logged and swallowed, and leaves
//! log and roster untouched.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use danran::domain::{ConversationTurn, FamilyRole, HappyMoment};
use danran::ports::GenerationService;

use crate::services::prompts;
use crate::services::structured::{extract_json_object, string_field, string_list_field};

/// Result of one extraction attempt
#[derive(Debug, Clone)]
pub enum MomentOutcome {
    Extracted(HappyMoment),
    Skipped(SkipReason),
}

/// Why no moment was extracted for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No persona contributed a turn this round
    EmptyRound,
    /// The generation call itself failed
    GenerationFailed,
    /// The output could not be parsed as the expected object
    MalformedPayload,
}

/// Summarizes a round into a `HappyMoment` via the generation service
pub struct MomentExtractor {
    generation: Arc<dyn GenerationService>,
}

impl MomentExtractor {
    pub fn new(generation: Arc<dyn GenerationService>) -> Self {
        Self { generation }
    }

    /// Extract a moment from one round's persona turns.
    ///
    /// Never returns an error: every failure mode collapses to `Skipped`.
    pub async fn extract(
        &self,
        user_message: &str,
        responses: &[ConversationTurn],
    ) -> MomentOutcome {
        let role_interactions = role_interactions(responses);
        if role_interactions.is_empty() {
            return MomentOutcome::Skipped(SkipReason::EmptyRound);
        }

        let prompt = prompts::moment_prompt(user_message, &role_interactions);
        let raw = match self.generation.generate_structured(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("moment extraction skipped, generation failed: {}", e);
                return MomentOutcome::Skipped(SkipReason::GenerationFailed);
            }
        };

        let Some(value) = extract_json_object(&raw) else {
            tracing::debug!("moment extraction skipped, unparseable payload");
            return MomentOutcome::Skipped(SkipReason::MalformedPayload);
        };

        MomentOutcome::Extracted(HappyMoment {
            activity: string_field(&value, "activity"),
            description: string_field(&value, "description"),
            emotions: string_list_field(&value, "emotions"),
            participants: string_list_field(&value, "participants"),
            setting: string_field(&value, "setting"),
            created_at: Utc::now(),
            role_interactions,
        })
    }
}

/// Map each responding role to the text it contributed this round
fn role_interactions(responses: &[ConversationTurn]) -> HashMap<FamilyRole, String> {
    let mut interactions = HashMap::new();
    for turn in responses {
        if let Some(role) = turn.role {
            interactions.insert(role, turn.message.clone());
        }
    }
    interactions
}

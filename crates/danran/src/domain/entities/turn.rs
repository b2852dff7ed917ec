//! ConversationTurn / ConversationLog - Append-only session transcript
//!
//! The log only grows; entries are never edited or removed once appended
//! (supports audit and replay). The trailing window is the only derived view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::persona::{Persona, PersonaSnapshot};
use crate::domain::value_objects::{Emotion, FamilyRole};

/// Number of trailing turns used as generation context
pub const CONTEXT_WINDOW_TURNS: usize = 5;

/// Speaker identifier used for the user's own turns
pub const USER_SPEAKER: &str = "user";

/// One logged utterance, immutable once appended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: String,
    pub message: String,
    pub emotion: Emotion,
    pub timestamp: DateTime<Utc>,
    /// Role tag of the speaking persona; `None` for the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<FamilyRole>,
    /// Persona attributes at time of speaking, for audit/display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<PersonaSnapshot>,
}

impl ConversationTurn {
    /// A user turn: fixed speaker, neutral emotion
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            speaker: USER_SPEAKER.to_string(),
            message: message.into(),
            emotion: Emotion::Neutral,
            timestamp: Utc::now(),
            role: None,
            persona: None,
        }
    }

    /// A persona turn carrying the persona's snapshot
    pub fn from_persona(persona: &Persona, message: impl Into<String>) -> Self {
        Self {
            speaker: persona.name.clone(),
            message: message.into(),
            emotion: persona.current_emotion,
            timestamp: Utc::now(),
            role: Some(persona.role),
            persona: Some(persona.snapshot()),
        }
    }

    /// Same, with an explicit emotion (used when the label is classified
    /// before the persona state is committed)
    pub fn from_persona_with_emotion(
        persona: &Persona,
        message: impl Into<String>,
        emotion: Emotion,
    ) -> Self {
        Self {
            speaker: persona.name.clone(),
            message: message.into(),
            emotion,
            timestamp: Utc::now(),
            role: Some(persona.role),
            persona: Some(persona.snapshot()),
        }
    }
}

/// Append-only, order-preserving record of all turns in a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    /// Append a single turn
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Commit one round's persona turns in scheduler-determined order
    pub fn append_batch(&mut self, turns: Vec<ConversationTurn>) {
        self.turns.extend(turns);
    }

    /// The last `n` turns, in append order, never more than `n`
    pub fn window(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(msg: &str) -> ConversationTurn {
        ConversationTurn::user(msg)
    }

    #[test]
    fn test_window_bounded_and_ordered() {
        let mut log = ConversationLog::new();
        for i in 0..10 {
            log.append(turn(&format!("m{}", i)));
        }

        let window = log.window(5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].message, "m5");
        assert_eq!(window[4].message, "m9");
    }

    #[test]
    fn test_window_smaller_log() {
        let mut log = ConversationLog::new();
        log.append(turn("only"));
        assert_eq!(log.window(5).len(), 1);
        assert_eq!(log.window(0).len(), 0);
    }

    #[test]
    fn test_user_turn_defaults() {
        let t = ConversationTurn::user("こんにちは");
        assert_eq!(t.speaker, USER_SPEAKER);
        assert_eq!(t.emotion, Emotion::Neutral);
        assert!(t.role.is_none());
        assert!(t.persona.is_none());
    }
}

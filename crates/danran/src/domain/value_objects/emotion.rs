//! Emotion - Fixed emotion enumeration for persona state
//!
//! Parsing is lenient because labels usually arrive embedded in model output
//! ("感情: happy (嬉しい)" etc.). Unknown text is a parse error, never a
//! silent substitution - callers decide the fallback.

use serde::{Deserialize, Serialize};

/// Current emotion of a persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Excited,
    Calm,
    Loving,
    Curious,
    Worried,
    Proud,
    Nostalgic,
    Neutral,
}

impl Emotion {
    const LABELS: [(Emotion, &'static str); 9] = [
        (Emotion::Happy, "happy"),
        (Emotion::Excited, "excited"),
        (Emotion::Calm, "calm"),
        (Emotion::Loving, "loving"),
        (Emotion::Curious, "curious"),
        (Emotion::Worried, "worried"),
        (Emotion::Proud, "proud"),
        (Emotion::Nostalgic, "nostalgic"),
        (Emotion::Neutral, "neutral"),
    ];

    pub fn as_str(&self) -> &'static str {
        Self::LABELS
            .iter()
            .find(|(e, _)| e == self)
            .map(|(_, label)| *label)
            .unwrap_or("neutral")
    }

    /// Find an emotion label anywhere inside free-form model output.
    ///
    /// First label found wins; exact matches are checked before substring
    /// containment so that "happy" in "I feel happy" resolves the same as a
    /// bare "happy".
    pub fn parse_lenient(text: &str) -> Option<Emotion> {
        let lowered = text.trim().to_lowercase();

        for (emotion, label) in Self::LABELS {
            if lowered == label {
                return Some(emotion);
            }
        }

        Self::LABELS
            .iter()
            .find(|(_, label)| lowered.contains(label))
            .map(|(emotion, _)| *emotion)
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Neutral
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_label() {
        assert_eq!(Emotion::parse_lenient("happy"), Some(Emotion::Happy));
        assert_eq!(Emotion::parse_lenient(" Calm \n"), Some(Emotion::Calm));
    }

    #[test]
    fn test_parse_embedded_label() {
        assert_eq!(
            Emotion::parse_lenient("感情: nostalgic (懐かしい)"),
            Some(Emotion::Nostalgic)
        );
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(Emotion::parse_lenient("とても眠い"), None);
    }
}

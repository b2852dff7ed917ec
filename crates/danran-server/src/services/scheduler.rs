//! Turn Scheduler - Deterministic responder selection and ordering
//!
//! Selection: every active persona responds (base policy). Ordering: the
//! user message is classified into need categories via fixed keyword lists,
//! each persona gets a rank from the role-priority table, and a stable sort
//! preserves roster order among equal ranks. The order is computed once,
//! before generation dispatch, and never recomputed from arrival order.

use danran::domain::{FamilyRole, Persona};
use serde::Serialize;

const WISDOM_KEYWORDS: [&str; 4] = ["悩み", "相談", "アドバイス", "経験"];
const CARE_KEYWORDS: [&str; 4] = ["体調", "健康", "心配", "面倒"];
const SUPPORT_KEYWORDS: [&str; 4] = ["助けて", "困った", "不安", "支え"];
const JOY_KEYWORDS: [&str; 4] = ["楽しい", "嬉しい", "遊び", "笑い"];

/// Need categories detected in a user message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageNeeds {
    pub needs_wisdom: bool,
    pub needs_care: bool,
    pub needs_support: bool,
    pub needs_joy: bool,
}

impl MessageNeeds {
    /// Classify a message by substring containment, first match per category
    pub fn analyze(message: &str) -> Self {
        Self {
            needs_wisdom: contains_any(message, &WISDOM_KEYWORDS),
            needs_care: contains_any(message, &CARE_KEYWORDS),
            needs_support: contains_any(message, &SUPPORT_KEYWORDS),
            needs_joy: contains_any(message, &JOY_KEYWORDS),
        }
    }
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

/// Priority rank for one persona given the message analysis.
///
/// Category checks follow the fixed order wisdom -> care -> support -> joy;
/// a persona whose role does not match the active category defaults to 4.
pub fn priority_rank(role: FamilyRole, needs: &MessageNeeds) -> u8 {
    if needs.needs_wisdom && role == FamilyRole::Grandfather {
        0
    } else if needs.needs_care && role == FamilyRole::Grandmother {
        1
    } else if needs.needs_support && role == FamilyRole::Partner {
        2
    } else if needs.needs_joy && role == FamilyRole::Child {
        3
    } else {
        4
    }
}

/// Computes the responder order for one turn
pub struct TurnScheduler;

impl TurnScheduler {
    /// Order the active roster for a user message.
    ///
    /// Returns clones of the personas in commit order; the caller treats this
    /// as the frozen priority order for the whole turn.
    pub fn schedule(roster: &[Persona], user_message: &str) -> Vec<Persona> {
        let needs = MessageNeeds::analyze(user_message);

        let mut ordered: Vec<Persona> = roster.to_vec();
        // Vec::sort_by_key is stable: equal ranks keep roster order
        ordered.sort_by_key(|persona| priority_rank(persona.role, &needs));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use danran::domain::{PersonaOverrides, RoleTemplateRegistry, UserProfile};

    fn roster() -> Vec<Persona> {
        let registry = RoleTemplateRegistry::new();
        let profile = UserProfile::default();
        [
            FamilyRole::Partner,
            FamilyRole::Child,
            FamilyRole::Grandfather,
            FamilyRole::Grandmother,
        ]
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

    #[test]
    fn test_keyword_free_message_keeps_roster_order() {
        // "子どもたちと公園に行きたい" contains no listed keyword
        let ordered = TurnScheduler::schedule(&roster(), "子どもたちと公園に行きたい");
        let roles: Vec<FamilyRole> = ordered.iter().map(|p| p.role).collect();
        assert_eq!(
            roles,
            vec![
                FamilyRole::Partner,
                FamilyRole::Child,
                FamilyRole::Grandfather,
                FamilyRole::Grandmother,
            ]
        );
    }

    #[test]
    fn test_wisdom_keyword_puts_grandfather_first() {
        let ordered = TurnScheduler::schedule(&roster(), "仕事の悩みを聞いてほしい");
        assert_eq!(ordered[0].role, FamilyRole::Grandfather);
        // everyone else keeps roster order behind the matched role
        let rest: Vec<FamilyRole> = ordered[1..].iter().map(|p| p.role).collect();
        assert_eq!(
            rest,
            vec![FamilyRole::Partner, FamilyRole::Child, FamilyRole::Grandmother]
        );
    }

    #[test]
    fn test_care_keyword_puts_grandmother_first() {
        let ordered = TurnScheduler::schedule(&roster(), "最近体調が良くないんだ");
        assert_eq!(ordered[0].role, FamilyRole::Grandmother);
    }

    #[test]
    fn test_joy_keyword_puts_child_first() {
        let ordered = TurnScheduler::schedule(&roster(), "今日は本当に楽しい一日だった");
        assert_eq!(ordered[0].role, FamilyRole::Child);
    }

    #[test]
    fn test_wisdom_outranks_joy_when_both_match() {
        // Both a wisdom and a joy keyword; grandfather still leads, child
        // keeps its joy rank ahead of unmatched roles.
        let ordered = TurnScheduler::schedule(&roster(), "楽しい経験を話したい");
        assert_eq!(ordered[0].role, FamilyRole::Grandfather);
        assert_eq!(ordered[1].role, FamilyRole::Child);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let message = "相談したいことがあって不安です";
        assert_eq!(MessageNeeds::analyze(message), MessageNeeds::analyze(message));
        let needs = MessageNeeds::analyze(message);
        assert!(needs.needs_wisdom);
        assert!(needs.needs_support);
        assert!(!needs.needs_care);
        assert!(!needs.needs_joy);
    }

    #[test]
    fn test_missing_matched_role_leaves_order_stable() {
        // Wisdom keyword but no grandfather in the roster: all ranks equal
        let registry = RoleTemplateRegistry::new();
        let profile = UserProfile::default();
        let small: Vec<Persona> = [FamilyRole::Partner, FamilyRole::Child]
            .iter()
            .map(|role| {
                Persona::instantiate(
                    registry.get(*role).unwrap(),
                    &profile,
                    &PersonaOverrides::default(),
                )
            })
            .collect();
        let ordered = TurnScheduler::schedule(&small, "人生相談がある");
        let roles: Vec<FamilyRole> = ordered.iter().map(|p| p.role).collect();
        assert_eq!(roles, vec![FamilyRole::Partner, FamilyRole::Child]);
    }
}

//! Family Roster - Active personas for one session
//!
//! `determine_roles` is the deterministic, total policy mapping a user
//! profile to role specs. The roster owns its personas; names are unique
//! within a roster and serve as the removal key. Mutations happen only
//! between turns, never while a turn's generation fan-out is in flight.

use danran::domain::{DomainError, FamilyRole, Persona, PersonaOverrides, UserProfile};

use crate::services::instantiator::PersonaInstantiator;

/// Users older than this get grandparent personas (strict comparison)
const GRANDPARENT_AGE_THRESHOLD: u32 = 25;

/// One role to instantiate, with its per-instance overrides
#[derive(Debug, Clone)]
pub struct RoleSpec {
    pub role: FamilyRole,
    pub overrides: PersonaOverrides,
}

/// Derive which roles apply to a profile.
///
/// Deterministic and total: the same profile always yields the same spec
/// list, and no profile fails.
pub fn determine_roles(profile: &UserProfile) -> Vec<RoleSpec> {
    let mut specs = Vec::new();

    if let Some(partner) = &profile.partner_info {
        specs.push(RoleSpec {
            role: FamilyRole::Partner,
            overrides: PersonaOverrides {
                name: partner.name.clone(),
                age: partner.age,
                ..PersonaOverrides::default()
            },
        });
    }

    for child in &profile.children_info {
        specs.push(RoleSpec {
            role: FamilyRole::Child,
            overrides: PersonaOverrides {
                age: Some(child.age),
                gender: Some(child.gender),
                personality_traits: if child.personality.is_empty() {
                    None
                } else {
                    Some(child.personality.clone())
                },
                ..PersonaOverrides::default()
            },
        });
    }

    if profile.age.unwrap_or(30) > GRANDPARENT_AGE_THRESHOLD {
        specs.push(RoleSpec {
            role: FamilyRole::Grandfather,
            overrides: PersonaOverrides::default(),
        });
        specs.push(RoleSpec {
            role: FamilyRole::Grandmother,
            overrides: PersonaOverrides::default(),
        });
    }

    specs
}

/// Ordered collection of active personas for a session
#[derive(Debug, Default)]
pub struct FamilyRoster {
    personas: Vec<Persona>,
}

impl FamilyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_personas(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    /// Instantiate all roles for a profile, replacing any existing roster
    pub async fn configure(
        &mut self,
        instantiator: &PersonaInstantiator,
        profile: &UserProfile,
    ) -> Result<&[Persona], DomainError> {
        let mut personas = Vec::new();
        for spec in determine_roles(profile) {
            let persona = instantiator
                .instantiate(spec.role, profile, &spec.overrides)
                .await?;
            ensure_unique(&personas, &persona.name)?;
            personas.push(persona);
        }
        self.personas = personas;
        Ok(&self.personas)
    }

    /// Add one persona to the live roster; duplicate names are rejected
    pub async fn add_member(
        &mut self,
        instantiator: &PersonaInstantiator,
        profile: &UserProfile,
        role: FamilyRole,
        overrides: &PersonaOverrides,
    ) -> Result<Persona, DomainError> {
        let persona = instantiator.instantiate(role, profile, overrides).await?;
        ensure_unique(&self.personas, &persona.name)?;
        self.personas.push(persona.clone());
        Ok(persona)
    }

    /// Remove a persona by name; no-op returning false when absent
    pub fn remove_member(&mut self, name: &str) -> bool {
        match self.personas.iter().position(|p| p.name == name) {
            Some(index) => {
                self.personas.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn by_role(&self, role: FamilyRole) -> Vec<&Persona> {
        self.personas.iter().filter(|p| p.role == role).collect()
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Persona> {
        self.personas.iter_mut().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

fn ensure_unique(personas: &[Persona], name: &str) -> Result<(), DomainError> {
    if personas.iter().any(|p| p.name == name) {
        return Err(DomainError::Conflict(format!(
            "persona name already in roster: {}",
            name
        )));
    }
    Ok(())
}

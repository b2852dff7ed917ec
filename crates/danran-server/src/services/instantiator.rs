//! Persona Instantiator - Template + profile + overrides -> Persona
//!
//! Construction itself is pure (delegated to the domain). The generation
//! service is only consulted to flavor the trait list for the user, and that
//! call is best-effort: any failure falls back to the merged defaults.

use std::sync::Arc;

use danran::domain::{DomainError, FamilyRole, Persona, PersonaOverrides, UserProfile};
use danran::domain::RoleTemplateRegistry;
use danran::ports::GenerationService;

use crate::services::prompts;
use crate::services::structured::{extract_json_object, string_list_field};

/// Builds concrete personas from the role catalog
pub struct PersonaInstantiator {
    registry: RoleTemplateRegistry,
    generation: Arc<dyn GenerationService>,
}

impl PersonaInstantiator {
    pub fn new(registry: RoleTemplateRegistry, generation: Arc<dyn GenerationService>) -> Self {
        Self {
            registry,
            generation,
        }
    }

    /// Instantiate a persona for a role.
    ///
    /// Fails only when the role tag is not registered; the flavoring call
    /// never propagates its error.
    pub async fn instantiate(
        &self,
        role: FamilyRole,
        profile: &UserProfile,
        overrides: &PersonaOverrides,
    ) -> Result<Persona, DomainError> {
        let template = self.registry.get(role)?;
        let mut persona = Persona::instantiate(template, profile, overrides);

        // Explicit overrides outrank flavored traits
        if overrides.personality_traits.is_none() {
            if let Some(traits) = self.flavor_traits(template, profile).await {
                persona.personality_traits = traits;
            }
        }

        Ok(persona)
    }

    /// Ask the generation service for user-fitted traits; `None` keeps the
    /// defaults.
    async fn flavor_traits(
        &self,
        template: &danran::domain::RoleTemplate,
        profile: &UserProfile,
    ) -> Option<Vec<String>> {
        let prompt = prompts::personality_prompt(template, profile);
        let raw = match self.generation.generate_structured(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(role = %template.role, "personality flavoring skipped: {}", e);
                return None;
            }
        };

        let traits = extract_json_object(&raw)
            .map(|value| string_list_field(&value, "traits"))
            .filter(|traits| !traits.is_empty());

        if traits.is_none() {
            tracing::debug!(role = %template.role, "personality flavoring returned no traits");
        }
        traits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use danran::ports::GenerationOptions;

    /// Generation stub with a fixed structured reply
    struct Scripted {
        structured: Result<String, ()>,
    }

    #[async_trait]
    impl GenerationService for Scripted {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, DomainError> {
            self.structured
                .clone()
                .map_err(|_| DomainError::GenerationUnavailable("scripted".to_string()))
        }
    }

    fn instantiator(structured: Result<String, ()>) -> PersonaInstantiator {
        PersonaInstantiator::new(
            RoleTemplateRegistry::new(),
            Arc::new(Scripted { structured }),
        )
    }

    #[tokio::test]
    async fn test_flavored_traits_applied() {
        let sut = instantiator(Ok(r#"{"traits": ["陽気", "聞き上手"]}"#.to_string()));
        let persona = sut
            .instantiate(
                FamilyRole::Partner,
                &UserProfile::default(),
                &PersonaOverrides::default(),
            )
            .await
            .unwrap();
        assert_eq!(
            persona.personality_traits,
            vec!["陽気".to_string(), "聞き上手".to_string()]
        );
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back_to_template() {
        let sut = instantiator(Err(()));
        let persona = sut
            .instantiate(
                FamilyRole::Partner,
                &UserProfile::default(),
                &PersonaOverrides::default(),
            )
            .await
            .unwrap();
        assert_eq!(persona.personality_traits[0], "愛情深い");
    }

    #[tokio::test]
    async fn test_non_json_flavor_falls_back() {
        let sut = instantiator(Ok("温かみのある性格が良いと思います。".to_string()));
        let persona = sut
            .instantiate(
                FamilyRole::Grandmother,
                &UserProfile::default(),
                &PersonaOverrides::default(),
            )
            .await
            .unwrap();
        assert_eq!(persona.personality_traits[0], "優しい");
    }

    #[tokio::test]
    async fn test_override_traits_skip_flavoring() {
        let sut = instantiator(Ok(r#"{"traits": ["上書きされない"]}"#.to_string()));
        let overrides = PersonaOverrides {
            personality_traits: Some(vec!["明朗".to_string()]),
            ..PersonaOverrides::default()
        };
        let persona = sut
            .instantiate(FamilyRole::Partner, &UserProfile::default(), &overrides)
            .await
            .unwrap();
        assert_eq!(persona.personality_traits, vec!["明朗".to_string()]);
    }
}

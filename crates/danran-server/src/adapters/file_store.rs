//! File-backed session store
//!
//! Persists each session's artifacts as pretty-printed JSON under
//! `<root>/<session_id>/`. Every save fully overwrites its file; loads of
//! never-saved artifacts return empty defaults.

use std::path::PathBuf;

use async_trait::async_trait;
use danran::domain::{ConversationTurn, DomainError, HappyMoment, Persona, UserProfile};
use danran::ports::SessionStore;
use serde::{de::DeserializeOwned, Serialize};

const ROSTER_FILE: &str = "roster.json";
const LOG_FILE: &str = "log.json";
const MOMENTS_FILE: &str = "moments.json";
const PROFILE_FILE: &str = "profile.json";

/// Session store writing per-session JSON files
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.root.join(session_id)
    }

    async fn write_json<T: Serialize>(
        &self,
        session_id: &str,
        file: &str,
        value: &T,
    ) -> Result<(), DomainError> {
        let dir = self.session_dir(session_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let content = serde_json::to_vec_pretty(value)
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        tokio::fs::write(dir.join(file), content)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        session_id: &str,
        file: &str,
    ) -> Result<Option<T>, DomainError> {
        let path = self.session_dir(session_id).join(file);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Repository(e.to_string())),
        };
        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| DomainError::Repository(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save_roster(
        &self,
        session_id: &str,
        personas: &[Persona],
    ) -> Result<(), DomainError> {
        self.write_json(session_id, ROSTER_FILE, &personas).await
    }

    async fn load_roster(&self, session_id: &str) -> Result<Vec<Persona>, DomainError> {
        Ok(self
            .read_json(session_id, ROSTER_FILE)
            .await?
            .unwrap_or_default())
    }

    async fn save_log(
        &self,
        session_id: &str,
        turns: &[ConversationTurn],
    ) -> Result<(), DomainError> {
        self.write_json(session_id, LOG_FILE, &turns).await
    }

    async fn load_log(&self, session_id: &str) -> Result<Vec<ConversationTurn>, DomainError> {
        Ok(self
            .read_json(session_id, LOG_FILE)
            .await?
            .unwrap_or_default())
    }

    async fn save_moments(
        &self,
        session_id: &str,
        moments: &[HappyMoment],
    ) -> Result<(), DomainError> {
        self.write_json(session_id, MOMENTS_FILE, &moments).await
    }

    async fn load_moments(&self, session_id: &str) -> Result<Vec<HappyMoment>, DomainError> {
        Ok(self
            .read_json(session_id, MOMENTS_FILE)
            .await?
            .unwrap_or_default())
    }

    async fn save_profile(
        &self,
        session_id: &str,
        profile: &UserProfile,
    ) -> Result<(), DomainError> {
        self.write_json(session_id, PROFILE_FILE, profile).await
    }

    async fn load_profile(&self, session_id: &str) -> Result<Option<UserProfile>, DomainError> {
        self.read_json(session_id, PROFILE_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use danran::domain::{
        ConversationLog, Emotion, FamilyRole, PersonaOverrides, RoleTemplateRegistry,
    };

    fn sample_personas() -> Vec<Persona> {
        let registry = RoleTemplateRegistry::new();
        let profile = UserProfile::default();
        vec![
            Persona::instantiate(
                registry.get(FamilyRole::Grandfather).unwrap(),
                &profile,
                &PersonaOverrides::default(),
            ),
            Persona::instantiate(
                registry.get(FamilyRole::Pet).unwrap(),
                &profile,
                &PersonaOverrides::default(),
            ),
        ]
    }

    #[tokio::test]
    async fn test_roster_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut personas = sample_personas();
        personas[0].current_emotion = Emotion::Proud;
        store.save_roster("s1", &personas).await.unwrap();

        let loaded = store.load_roster("s1").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "じいじ");
        assert_eq!(loaded[0].current_emotion, Emotion::Proud);
        assert_eq!(loaded[1].role, FamilyRole::Pet);
    }

    #[tokio::test]
    async fn test_log_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let mut log = ConversationLog::new();
        log.append(ConversationTurn::user("おはよう"));
        log.append(ConversationTurn::from_persona(
            &sample_personas()[0],
            "おはよう、よく眠れたかい",
        ));
        store.save_log("s1", log.turns()).await.unwrap();

        let loaded = store.load_log("s1").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].speaker, "user");
        assert_eq!(loaded[1].role, Some(FamilyRole::Grandfather));
        assert!(loaded[1].persona.is_some());
    }

    #[tokio::test]
    async fn test_save_overwrites_fully() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save_roster("s1", &sample_personas()).await.unwrap();
        store.save_roster("s1", &sample_personas()[..1]).await.unwrap();
        assert_eq!(store.load_roster("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_artifacts_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert!(store.load_roster("nobody").await.unwrap().is_empty());
        assert!(store.load_log("nobody").await.unwrap().is_empty());
        assert!(store.load_moments("nobody").await.unwrap().is_empty());
        assert!(store.load_profile("nobody").await.unwrap().is_none());
    }
}

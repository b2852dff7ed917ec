//! Session Application Service (Use Case)
//!
//! Owns session lifecycle and drives the turn pipeline: append user message,
//! snapshot context, schedule, fan out generation, commit in priority order,
//! extract a moment, persist. Each session sits behind its own lock, held for
//! the whole turn, so one task drives the pipeline per session while turns in
//! unrelated sessions overlap freely. The map-level lock only resolves
//! session handles and is never held across an await into generation. Roster
//! mutations go through the same per-session lock, so the roster never
//! changes under an in-flight turn.

use std::collections::HashMap;
use std::sync::Arc;

use danran::domain::{
    ConversationLog, ConversationTurn, DomainError, FamilyRole, FamilyScene, HappyMoment,
    Persona, PersonaOverrides, UserProfile, CONTEXT_WINDOW_TURNS,
};
use danran::ports::SessionStore;
use tokio::sync::Mutex;

use crate::services::{
    FamilyRoster, MomentExtractor, MomentOutcome, PersonaInstantiator, Responder, SceneComposer,
    TurnScheduler,
};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Ended,
}

/// One live session: roster, transcript, extracted moments
pub struct Session {
    pub id: String,
    pub state: SessionState,
    pub profile: UserProfile,
    pub roster: FamilyRoster,
    pub log: ConversationLog,
    pub moments: Vec<HappyMoment>,
}

type SessionHandle = Arc<Mutex<Session>>;

/// Application service for session lifecycle and message processing
pub struct SessionService<S: SessionStore> {
    store: Arc<S>,
    instantiator: PersonaInstantiator,
    responder: Responder,
    extractor: MomentExtractor,
    composer: SceneComposer,
    greet_on_start: bool,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(
        store: Arc<S>,
        instantiator: PersonaInstantiator,
        responder: Responder,
        extractor: MomentExtractor,
        composer: SceneComposer,
        greet_on_start: bool,
    ) -> Self {
        Self {
            store,
            instantiator,
            responder,
            extractor,
            composer,
            greet_on_start,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start (or restart) a session: configure the roster from the profile,
    /// clear log and moments, optionally emit one greeting turn per persona.
    ///
    /// Valid from any prior state; an existing session is replaced.
    pub async fn start(
        &self,
        session_id: &str,
        profile: Option<UserProfile>,
    ) -> Result<Vec<ConversationTurn>, DomainError> {
        let profile = match profile {
            Some(profile) => profile,
            None => self
                .store
                .load_profile(session_id)
                .await?
                .unwrap_or_default(),
        };

        let mut session = Session {
            id: session_id.to_string(),
            state: SessionState::Active,
            profile: profile.clone(),
            roster: FamilyRoster::new(),
            log: ConversationLog::new(),
            moments: Vec::new(),
        };
        session
            .roster
            .configure(&self.instantiator, &profile)
            .await?;

        let mut greetings = Vec::new();
        if self.greet_on_start {
            let replies = self.responder.greet_all(session.roster.personas()).await;
            for (persona, reply) in session.roster.personas().iter().zip(replies) {
                if let Some(reply) = reply {
                    let emotion = reply.emotion.unwrap_or(persona.current_emotion);
                    greetings.push(ConversationTurn::from_persona_with_emotion(
                        persona, reply.text, emotion,
                    ));
                }
            }
            session.log.append_batch(greetings.clone());
        }

        self.store.save_profile(session_id, &profile).await?;
        self.persist(&session).await?;

        tracing::info!(
            session = session_id,
            personas = session.roster.len(),
            "session started"
        );

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.to_string(), Arc::new(Mutex::new(session)));
        Ok(greetings)
    }

    /// Process one user message through the full turn pipeline.
    ///
    /// Returns the committed persona turns in priority order. Generation
    /// failures degrade to fewer (possibly zero) turns, never an error.
    pub async fn process_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<ConversationTurn>, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;
        ensure_active(&session)?;

        // User message is always logged first, before any persona responds
        session.log.append(ConversationTurn::user(message));

        // Context snapshot, taken once for every persona in this round
        let window: Vec<ConversationTurn> =
            session.log.window(CONTEXT_WINDOW_TURNS).to_vec();

        // Priority order computed before dispatch, never recomputed after
        let ordered = TurnScheduler::schedule(session.roster.personas(), message);

        let replies = self.responder.respond_all(&ordered, message, &window).await;

        // Commit on this task only: emotions, persona histories, log order
        let mut committed = Vec::new();
        for (scheduled, reply) in ordered.iter().zip(replies) {
            let Some(reply) = reply else {
                continue;
            };
            let Some(persona) = session.roster.find_mut(&scheduled.name) else {
                continue;
            };
            if let Some(emotion) = reply.emotion {
                persona.current_emotion = emotion;
            }
            persona.record_exchange(message, &reply.text);
            committed.push(ConversationTurn::from_persona(persona, reply.text));
        }
        session.log.append_batch(committed.clone());

        match self.extractor.extract(message, &committed).await {
            MomentOutcome::Extracted(moment) => session.moments.push(moment),
            MomentOutcome::Skipped(reason) => {
                tracing::debug!(session = session_id, ?reason, "no moment this round");
            }
        }

        self.persist(&session).await?;

        tracing::info!(
            session = session_id,
            responders = committed.len(),
            "turn committed"
        );
        Ok(committed)
    }

    /// End a session: flush a final snapshot and refuse further messages
    pub async fn end(&self, session_id: &str) -> Result<(), DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;
        ensure_active(&session)?;
        self.persist(&session).await?;
        session.state = SessionState::Ended;
        tracing::info!(session = session_id, "session ended");
        Ok(())
    }

    /// Add a persona to the roster (between turns only)
    pub async fn add_member(
        &self,
        session_id: &str,
        role: FamilyRole,
        overrides: &PersonaOverrides,
    ) -> Result<Persona, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;
        ensure_active(&session)?;
        let profile = session.profile.clone();
        let persona = session
            .roster
            .add_member(&self.instantiator, &profile, role, overrides)
            .await?;
        self.store
            .save_roster(session_id, session.roster.personas())
            .await?;
        Ok(persona)
    }

    /// Remove a persona by name; false when no such persona exists
    pub async fn remove_member(
        &self,
        session_id: &str,
        name: &str,
    ) -> Result<bool, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let mut session = handle.lock().await;
        ensure_active(&session)?;
        let removed = session.roster.remove_member(name);
        if removed {
            self.store
                .save_roster(session_id, session.roster.personas())
                .await?;
        }
        Ok(removed)
    }

    /// Profile of an existing session (readable after end as well)
    pub async fn profile(&self, session_id: &str) -> Result<UserProfile, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.profile.clone())
    }

    /// Current roster of an active session
    pub async fn roster(&self, session_id: &str) -> Result<Vec<Persona>, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let session = handle.lock().await;
        ensure_active(&session)?;
        Ok(session.roster.personas().to_vec())
    }

    /// Happy moments collected so far
    pub async fn moments(&self, session_id: &str) -> Result<Vec<HappyMoment>, DomainError> {
        let handle = self.session_handle(session_id).await?;
        let session = handle.lock().await;
        ensure_active(&session)?;
        Ok(session.moments.clone())
    }

    /// Scene rendering of the latest happy moment; `None` before any moment
    pub async fn scene(&self, session_id: &str) -> Result<Option<FamilyScene>, DomainError> {
        let moments = self.moments(session_id).await?;
        Ok(self.composer.compose(&moments).await)
    }

    /// Rebuild a session from its persisted artifacts
    pub async fn restore(&self, session_id: &str) -> Result<(), DomainError> {
        let profile = self
            .store
            .load_profile(session_id)
            .await?
            .unwrap_or_default();
        let personas = self.store.load_roster(session_id).await?;
        let turns = self.store.load_log(session_id).await?;
        let moments = self.store.load_moments(session_id).await?;

        let session = Session {
            id: session_id.to_string(),
            state: SessionState::Active,
            profile,
            roster: FamilyRoster::from_personas(personas),
            log: ConversationLog::from_turns(turns),
            moments,
        };
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.to_string(), Arc::new(Mutex::new(session)));
        Ok(())
    }

    async fn session_handle(&self, session_id: &str) -> Result<SessionHandle, DomainError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| DomainError::session_not_active(session_id))
    }

    async fn persist(&self, session: &Session) -> Result<(), DomainError> {
        self.store
            .save_roster(&session.id, session.roster.personas())
            .await?;
        self.store.save_log(&session.id, session.log.turns()).await?;
        self.store
            .save_moments(&session.id, &session.moments)
            .await?;
        Ok(())
    }
}

fn ensure_active(session: &Session) -> Result<(), DomainError> {
    if session.state != SessionState::Active {
        return Err(DomainError::session_not_active(&session.id));
    }
    Ok(())
}

//! Danran API Routes
//!
//! - /session/start - Start a session and configure the family roster
//! - /session/message - Process one user message through the turn pipeline
//! - /session/:id/profile - User profile for a session
//! - /session/:id/members - Roster listing and mutation
//! - /session/:id/moments - Extracted happy moments
//! - /session/:id/scene - Scene rendering of the latest moment
//! - /session/:id/end - End a session

pub mod session;
pub mod swagger;

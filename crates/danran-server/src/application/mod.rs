//! Application Services (Use Cases)

pub mod session_service;

pub use session_service::{Session, SessionService, SessionState};

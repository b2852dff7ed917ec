//! Configuration for the Danran server
//!
//! Read once from the environment at startup (`.env` honored via dotenvy).

use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key for the generation client
    pub gemini_api_key: Option<String>,
    /// Gemini model name override
    pub gemini_model: Option<String>,
    /// Root directory for per-session artifacts
    pub data_dir: PathBuf,
    /// Listen port
    pub port: u16,
    /// Overall deadline for one turn's generation fan-out
    pub turn_deadline: Duration,
    /// Emit one greeting turn per persona when a session starts
    pub greet_on_start: bool,
}

impl Config {
    /// Build configuration from environment variables
    pub fn from_env() -> Self {
        let data_dir = std::env::var("DANRAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/sessions"));

        let port = std::env::var("DANRAN_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let turn_deadline = std::env::var("DANRAN_TURN_DEADLINE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let greet_on_start = std::env::var("DANRAN_GREET_ON_START")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("DANRAN_GEMINI_MODEL").ok(),
            data_dir,
            port,
            turn_deadline,
            greet_on_start,
        }
    }
}

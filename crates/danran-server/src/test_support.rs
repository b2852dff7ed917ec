//! Scripted generation stub shared by service tests

use std::time::Duration;

use async_trait::async_trait;
use danran::domain::DomainError;
use danran::ports::{GenerationOptions, GenerationService};

/// Canned generation service: replies are matched by prompt substring,
/// selected prompts can be made to fail or hang, and every call can carry a
/// fixed latency (paired with `tokio::time::pause` in timing tests).
#[derive(Default)]
pub struct ScriptedGeneration {
    replies: Vec<(String, String)>,
    fail_on: Vec<String>,
    stall_on: Vec<String>,
    delay: Option<Duration>,
    default_reply: String,
}

impl ScriptedGeneration {
    pub fn new() -> Self {
        Self {
            replies: Vec::new(),
            fail_on: Vec::new(),
            stall_on: Vec::new(),
            delay: None,
            default_reply: "わかりました。".to_string(),
        }
    }

    /// Reply with `reply` for prompts containing `needle` (first match wins)
    pub fn reply_containing(mut self, needle: &str, reply: &str) -> Self {
        self.replies.push((needle.to_string(), reply.to_string()));
        self
    }

    /// Fail prompts containing `needle` with `GenerationUnavailable`
    pub fn fail_containing(mut self, needle: &str) -> Self {
        self.fail_on.push(needle.to_string());
        self
    }

    /// Hang forever on prompts containing `needle` (exercises deadlines)
    pub fn stall_containing(mut self, needle: &str) -> Self {
        self.stall_on.push(needle.to_string());
        self
    }

    /// Sleep `delay` before answering any prompt
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl GenerationService for ScriptedGeneration {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, DomainError> {
        if self.stall_on.iter().any(|needle| prompt.contains(needle)) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on.iter().any(|needle| prompt.contains(needle)) {
            return Err(DomainError::GenerationUnavailable(
                "scripted failure".to_string(),
            ));
        }
        for (needle, reply) in &self.replies {
            if prompt.contains(needle) {
                return Ok(reply.clone());
            }
        }
        Ok(self.default_reply.clone())
    }
}

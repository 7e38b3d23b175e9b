use crate::config::DEFAULT_TUTOR_PROMPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier, used in logs
    pub session_id: String,

    /// Instruction prefix of the system turn; the transcript is appended to it
    pub system_prompt: String,

    /// Model used for chat turns
    pub model: String,

    /// Upper bound on a single completion call
    pub completion_timeout: Duration,
}

impl SessionConfig {
    /// Same settings under a fresh session id
    pub fn for_new_session(&self) -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            ..self.clone()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            system_prompt: DEFAULT_TUTOR_PROMPT.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            completion_timeout: Duration::from_secs(30),
        }
    }
}

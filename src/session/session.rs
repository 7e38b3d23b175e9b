use super::config::SessionConfig;
use super::message::{Message, Role};
use crate::completion::{
    complete_within, ChatMessage, CompletionProvider, CompletionRequest, ResponseFormat,
};
use crate::error::{RelayError, RelayResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Position in a session's history that a failed frame can roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint(usize);

/// Ordered conversation history for one client connection.
///
/// Once any turn exists, the first one is the system turn.
///
/// The session is exclusively owned by its connection; all mutation goes
/// through `&mut self`, so turns are recorded in the order the connection
/// processes them.
pub struct ConversationSession {
    /// Session configuration
    config: SessionConfig,

    /// Provider that produces assistant turns
    provider: Arc<dyn CompletionProvider>,

    /// Recorded turns, in conversational order
    history: Vec<Message>,
}

impl ConversationSession {
    /// Create an empty session
    pub fn new(config: SessionConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        info!(
            "Creating conversation session: {} (provider={})",
            config.session_id,
            provider.name()
        );

        Self {
            config,
            provider,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Read-only view of the recorded turns
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether the system turn has been recorded
    pub fn is_seeded(&self) -> bool {
        self.history
            .first()
            .map(|m| m.role() == Role::System)
            .unwrap_or(false)
    }

    /// Record the system turn: the instruction prefix followed by the
    /// condensed transcript. Allowed once, and only as the first turn.
    pub fn seed_from_transcript(&mut self, condensed: &str) -> RelayResult<&Message> {
        if self.is_seeded() {
            return Err(RelayError::IllegalState(
                "session already has a system turn".into(),
            ));
        }

        let content = format!("{}{}", self.config.system_prompt, condensed);
        Ok(self.record(Role::System, content))
    }

    /// Record a user turn. On an empty session the system turn is recorded
    /// first, holding the instruction prefix without a transcript.
    pub fn append_user(&mut self, content: impl Into<String>) -> &Message {
        self.record_turn(Role::User, content.into())
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.record_turn(Role::Assistant, content.into())
    }

    /// Send the whole history to the provider and record its reply.
    ///
    /// Single attempt. On failure the history is left untouched.
    pub async fn request_next_turn(&mut self) -> RelayResult<Message> {
        if self.history.is_empty() {
            return Err(RelayError::IllegalState(
                "cannot request a reply for an empty conversation".into(),
            ));
        }

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: self
                .history
                .iter()
                .map(|m| ChatMessage::new(m.role(), m.content()))
                .collect(),
            format: ResponseFormat::Text,
        };

        let reply = complete_within(
            self.provider.as_ref(),
            request,
            self.config.completion_timeout,
        )
        .await
        .map_err(|e| {
            warn!("Session {}: completion failed: {}", self.config.session_id, e);
            e
        })?;

        Ok(self.append_assistant(reply).clone())
    }

    /// Mark the current end of history
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.history.len())
    }

    /// Discard turns recorded after `checkpoint`.
    ///
    /// Only used to undo the partial work of a frame that failed before its
    /// reply was delivered.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        if checkpoint.0 < self.history.len() {
            debug!(
                "Session {}: rolling back {} turns",
                self.config.session_id,
                self.history.len() - checkpoint.0
            );
            self.history.truncate(checkpoint.0);
        }
    }

    fn record_turn(&mut self, role: Role, content: String) -> &Message {
        if self.history.is_empty() {
            debug!(
                "Session {}: no transcript supplied, seeding instruction prefix only",
                self.config.session_id
            );
            let prefix = self.config.system_prompt.clone();
            self.record(Role::System, prefix);
        }
        self.record(role, content)
    }

    fn record(&mut self, role: Role, content: String) -> &Message {
        let ordinal = self.history.len();
        self.history.push(Message::new(role, content, ordinal));
        &self.history[ordinal]
    }
}

use crate::error::{RelayError, RelayResult};
use crate::session::Role;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One role-tagged turn as sent to the completion API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask the provider to emit a single JSON object
    JsonObject,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub format: ResponseFormat,
}

/// A completion API that produces the next assistant reply
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the assistant's reply text
    async fn complete(&self, request: CompletionRequest) -> RelayResult<String>;
}

/// Run a single completion attempt bounded by `timeout`
pub async fn complete_within(
    provider: &dyn CompletionProvider,
    request: CompletionRequest,
    timeout: Duration,
) -> RelayResult<String> {
    tokio::time::timeout(timeout, provider.complete(request))
        .await
        .map_err(|_| RelayError::TimeoutExceeded(timeout))?
}

use super::provider::{
    complete_within, ChatMessage, CompletionProvider, CompletionRequest, ResponseFormat,
};
use crate::error::{RelayError, RelayResult};
use crate::session::Role;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Multiple-choice quiz produced by the completion provider.
///
/// Question objects are passed through as produced; only the outer shape
/// is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<serde_json::Map<String, serde_json::Value>>,

    /// Any additional top-level fields the provider emitted
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Quiz {
    /// Validate an untrusted provider reply as a quiz payload
    pub fn parse(raw: &str) -> RelayResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            RelayError::CompletionUnavailable(format!("Quiz reply is not JSON: {}", e))
        })?;

        if !value.is_object() {
            return Err(RelayError::CompletionUnavailable(
                "Quiz reply is not a JSON object".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            RelayError::CompletionUnavailable(format!("Quiz reply has unexpected shape: {}", e))
        })
    }
}

/// Settings for one quiz generation call
#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub model: String,
    pub system_prompt: String,
    pub timeout: Duration,
}

/// Ask the provider for a quiz grounded in `transcript`
pub async fn generate_quiz(
    provider: &dyn CompletionProvider,
    settings: &QuizSettings,
    transcript: &str,
) -> RelayResult<Quiz> {
    let request = CompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            ChatMessage::new(Role::System, settings.system_prompt.clone()),
            ChatMessage::new(Role::User, transcript),
        ],
        format: ResponseFormat::JsonObject,
    };

    let reply = complete_within(provider, request, settings.timeout).await?;
    let quiz = Quiz::parse(&reply)?;

    info!("Generated quiz with {} questions", quiz.questions.len());
    Ok(quiz)
}

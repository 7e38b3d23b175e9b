use super::provider::{CompletionProvider, CompletionRequest, ResponseFormat};
use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions client
pub struct OpenAiProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn request_body(request: &CompletionRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": request.model,
        "messages": request.messages,
    });

    if request.format == ResponseFormat::JsonObject {
        body["response_format"] = serde_json::json!({ "type": "json_object" });
    }

    body
}

fn reply_content(raw: &str) -> RelayResult<String> {
    let completion: ChatCompletion = serde_json::from_str(raw).map_err(|e| {
        RelayError::CompletionUnavailable(format!("Failed to parse response: {}", e))
    })?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            RelayError::CompletionUnavailable("malformed response: no message content".into())
        })
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> RelayResult<String> {
        debug!(
            "Requesting completion from {} ({} messages)",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body(&request))
            .send()
            .await
            .map_err(|e| RelayError::CompletionUnavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::CompletionUnavailable(e.to_string()))?;

        if !status.is_success() {
            warn!("Completion request failed with HTTP {}", status);
            return Err(RelayError::CompletionUnavailable(format!(
                "HTTP {}: {}",
                status, text
            )));
        }

        reply_content(&text)
    }
}

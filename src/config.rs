use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the completion API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

pub const DEFAULT_TUTOR_PROMPT: &str = "First. Say Hi! Keep the messages to one sentence. \
You are a tutor chat bot to help the user, a student understand the material in a video. \
Learn from the video transcript below: ";

pub const DEFAULT_QUIZ_PROMPT: &str = "You help create multiple choice questions from a transcript. \
The transcript came from a Youtube Video about the topic. Create questions that are technical \
and whose answers can be found in the transcript. Output in JSON.";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub openai: OpenAiConfig,
    pub tutor: TutorConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiConfig {
    /// Never read from config files, only from `OPENAI_API_KEY`
    #[serde(skip)]
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub quiz_model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct TutorConfig {
    pub system_prompt: String,
    /// Condensed transcript length threshold, in characters
    pub transcript_cap: usize,
    /// Preferred caption language; first track when unset
    pub caption_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizConfig {
    pub default_video: String,
    pub system_prompt: String,
}

impl OpenAiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load defaults, the optional config file at `path`, and
    /// `TUBE_TUTOR_*` environment overrides. The API key comes from the
    /// process environment and is required.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_key(path, std::env::var(API_KEY_VAR).ok())
    }

    pub fn load_with_key(path: &str, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("{} is not set", API_KEY_VAR))?;

        let settings = config::Config::builder()
            .set_default("service.name", "tube-tutor")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8080)?
            .set_default("openai.base_url", "https://api.openai.com/v1")?
            .set_default("openai.chat_model", "gpt-3.5-turbo")?
            .set_default("openai.quiz_model", "gpt-3.5-turbo-0125")?
            .set_default("openai.timeout_secs", 30)?
            .set_default("tutor.system_prompt", DEFAULT_TUTOR_PROMPT)?
            .set_default("tutor.transcript_cap", 1000)?
            .set_default(
                "quiz.default_video",
                "https://www.youtube.com/watch?v=x7X9w_GIm1s",
            )?
            .set_default("quiz.system_prompt", DEFAULT_QUIZ_PROMPT)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("TUBE_TUTOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        cfg.openai.api_key = api_key;

        Ok(cfg)
    }
}

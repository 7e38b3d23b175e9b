// Shared test doubles for the completion provider and transcript source

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tube_tutor::completion::{CompletionProvider, CompletionRequest, QuizSettings};
use tube_tutor::{AppState, RelayError, RelayResult, SessionConfig, TranscriptFetcher, TranscriptSegment};

/// Provider that replays scripted replies and records every request
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<RelayResult<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
    /// Requests whose last turn has this content never finish
    stall_on: Option<String>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<RelayResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Ok("too late".to_string())].into()),
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn stalling_on(marker: &str, texts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(texts.iter().map(|t| Ok(t.to_string())).collect()),
            stall_on: Some(marker.to_string()),
            ..Default::default()
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> RelayResult<String> {
        let stalled = match (&self.stall_on, request.messages.last()) {
            (Some(marker), Some(last)) => last.content == *marker,
            _ => false,
        };
        self.requests.lock().unwrap().push(request);
        if stalled {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RelayError::CompletionUnavailable("script exhausted".into())))
    }
}

/// Fetcher that returns fixed segments, or fails
pub struct StubFetcher {
    segments: Option<Vec<TranscriptSegment>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with_texts(texts: &[&str]) -> Arc<Self> {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TranscriptSegment::new(*t, i as f64 * 2.0, 2.0))
            .collect();
        Arc::new(Self {
            segments: Some(segments),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            segments: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptFetcher for StubFetcher {
    async fn fetch(&self, video: &str) -> RelayResult<Vec<TranscriptSegment>> {
        self.calls.lock().unwrap().push(video.to_string());
        self.segments.clone().ok_or_else(|| {
            RelayError::TranscriptUnavailable(format!("Transcripts are disabled for video {}", video))
        })
    }
}

pub fn session_config() -> SessionConfig {
    SessionConfig {
        session_id: "test-session".to_string(),
        system_prompt: "Tutor from this: ".to_string(),
        model: "test-model".to_string(),
        completion_timeout: Duration::from_secs(5),
    }
}

pub fn app_state(provider: Arc<ScriptedProvider>, fetcher: Arc<StubFetcher>) -> AppState {
    AppState::new(
        provider,
        fetcher,
        session_config(),
        QuizSettings {
            model: "quiz-model".to_string(),
            system_prompt: "Make a quiz.".to_string(),
            timeout: Duration::from_secs(5),
        },
        "https://www.youtube.com/watch?v=x7X9w_GIm1s".to_string(),
    )
}

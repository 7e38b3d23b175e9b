use crate::completion::{CompletionProvider, QuizSettings};
use crate::session::SessionConfig;
use crate::transcript::{TranscriptCondenser, TranscriptFetcher};
use std::sync::Arc;

/// Shared application state for HTTP handlers.
///
/// Holds only immutable collaborators; conversation state lives in each
/// connection, never here.
#[derive(Clone)]
pub struct AppState {
    /// Completion API used by sessions and quizzes
    pub provider: Arc<dyn CompletionProvider>,

    /// Transcript source for "meta" frames and quizzes
    pub fetcher: Arc<dyn TranscriptFetcher>,

    pub condenser: TranscriptCondenser,

    /// Template for per-connection sessions (a fresh id is minted per connection)
    pub session: SessionConfig,

    pub quiz: QuizSettings,

    /// Video used by `GET /quiz` when none is given
    pub default_quiz_video: String,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        fetcher: Arc<dyn TranscriptFetcher>,
        session: SessionConfig,
        quiz: QuizSettings,
        default_quiz_video: String,
    ) -> Self {
        Self {
            provider,
            fetcher,
            condenser: TranscriptCondenser::default(),
            session,
            quiz,
            default_quiz_video,
        }
    }

    pub fn with_condenser(mut self, condenser: TranscriptCondenser) -> Self {
        self.condenser = condenser;
        self
    }
}

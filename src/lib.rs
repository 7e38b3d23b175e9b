pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod transcript;

pub use completion::{CompletionProvider, OpenAiProvider, Quiz, QuizSettings};
pub use self::config::Config;
pub use error::{RelayError, RelayResult};
pub use http::{create_router, AppState, Connection, OutboundFrame};
pub use session::{ConversationSession, Message, Role, SessionConfig};
pub use transcript::{
    TranscriptCondenser, TranscriptFetcher, TranscriptSegment, YouTubeTranscriptFetcher,
};

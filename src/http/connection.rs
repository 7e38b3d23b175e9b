use super::frames::{FrameIntent, InboundFrame, OutboundFrame};
use super::state::AppState;
use crate::error::{RelayError, RelayResult};
use crate::session::{Checkpoint, ConversationSession, Message};
use crate::transcript::{TranscriptCondenser, TranscriptFetcher};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-connection frame driver.
///
/// Owns the connection's session and handles one frame at a time; a frame
/// either produces its reply or fails with the session exactly as it was
/// before the frame.
pub struct Connection {
    session: ConversationSession,
    fetcher: Arc<dyn TranscriptFetcher>,
    condenser: TranscriptCondenser,
}

impl Connection {
    pub fn new(state: &AppState) -> Self {
        let session =
            ConversationSession::new(state.session.for_new_session(), Arc::clone(&state.provider));

        Self {
            session,
            fetcher: Arc::clone(&state.fetcher),
            condenser: state.condenser,
        }
    }

    pub fn id(&self) -> &str {
        self.session.session_id()
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Handle one raw frame; `None` means no reply is due
    pub async fn handle_frame(&mut self, raw: &[u8]) -> Option<OutboundFrame> {
        let reply = match self.dispatch(raw).await {
            Ok(Some(message)) => Some(OutboundFrame::assistant(message.content())),
            Ok(None) => None,
            Err(e) => {
                warn!("Connection {}: rejected frame: {}", self.id(), e);
                Some(OutboundFrame::error(&e))
            }
        };

        debug!(
            "Connection {}: history now {} turns: {:?}",
            self.id(),
            self.session.len(),
            self.session.history()
        );

        reply
    }

    async fn dispatch(&mut self, raw: &[u8]) -> RelayResult<Option<Message>> {
        match InboundFrame::parse(raw)?.intent()? {
            FrameIntent::Meta(video) => self.on_meta(&video).await.map(Some),
            FrameIntent::User(text) => self.on_user(text).await.map(Some),
            FrameIntent::Ignored(role) => {
                debug!("Connection {}: ignoring {:?} frame", self.id(), role);
                Ok(None)
            }
        }
    }

    async fn on_meta(&mut self, video: &str) -> RelayResult<Message> {
        // Reject before touching the network
        if self.session.is_seeded() {
            return Err(RelayError::IllegalState(
                "conversation already started, transcript can no longer be supplied".into(),
            ));
        }

        info!("Connection {}: loading transcript for {}", self.id(), video);
        let segments = self.fetcher.fetch(video).await?;
        let condensed = self.condenser.condense(&segments)?;

        let checkpoint = self.session.checkpoint();
        self.session.seed_from_transcript(&condensed)?;
        self.complete_or_restore(checkpoint).await
    }

    async fn on_user(&mut self, text: String) -> RelayResult<Message> {
        let checkpoint = self.session.checkpoint();
        self.session.append_user(text);
        self.complete_or_restore(checkpoint).await
    }

    async fn complete_or_restore(&mut self, checkpoint: Checkpoint) -> RelayResult<Message> {
        match self.session.request_next_turn().await {
            Ok(message) => Ok(message),
            Err(e) => {
                self.session.restore(checkpoint);
                Err(e)
            }
        }
    }
}

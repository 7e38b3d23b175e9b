//! Conversation session management
//!
//! This module provides the `ConversationSession` abstraction that manages:
//! - Ordered message history for one client connection
//! - The system turn seeded from a condensed transcript
//! - Completion requests over the full history

mod config;
mod message;
mod session;

pub use self::config::SessionConfig;
pub use message::{Message, Role};
pub use session::ConversationSession;
pub(crate) use session::Checkpoint;

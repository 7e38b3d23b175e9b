//! HTTP API and tutoring WebSocket
//!
//! This module provides the client-facing surface:
//! - GET / - Welcome text, or a tutoring WebSocket when upgraded
//! - GET /quiz?video=<ref> - Multiple-choice quiz from a video transcript
//! - GET /health - Health check
//!
//! WebSocket frames are JSON objects tagged by `role`: clients send
//! `meta` (video reference) and `user` (question) frames and receive
//! `assistant` or `error` frames.

mod connection;
mod frames;
mod handlers;
mod routes;
mod socket;
mod state;

pub use connection::Connection;
pub use frames::{FrameIntent, InboundFrame, OutboundFrame};
pub use handlers::{ErrorResponse, WELCOME};
pub use routes::create_router;
pub use state::AppState;

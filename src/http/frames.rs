use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// Inbound frame from a tutoring client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundFrame {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// What an inbound frame asks the connection to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameIntent {
    /// Seed the session from this video reference
    Meta(String),
    /// Record a user turn
    User(String),
    /// Unknown tag, no response
    Ignored(String),
}

impl InboundFrame {
    pub fn parse(raw: &[u8]) -> RelayResult<Self> {
        serde_json::from_slice(raw).map_err(|e| RelayError::InvalidFrame(e.to_string()))
    }

    pub fn intent(self) -> RelayResult<FrameIntent> {
        let InboundFrame { role, content } = self;

        let required = |content: Option<String>| {
            content.ok_or_else(|| {
                RelayError::InvalidFrame(format!("\"{}\" frame is missing \"content\"", role))
            })
        };

        match role.as_str() {
            "meta" => Ok(FrameIntent::Meta(required(content)?)),
            "user" => Ok(FrameIntent::User(required(content)?)),
            _ => Ok(FrameIntent::Ignored(role.clone())),
        }
    }
}

/// Outbound frame sent to a tutoring client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum OutboundFrame {
    Assistant {
        content: String,
        /// Random tag, not guaranteed unique
        id: u32,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl OutboundFrame {
    pub fn assistant(content: impl Into<String>) -> Self {
        OutboundFrame::Assistant {
            content: content.into(),
            id: rand::random(),
        }
    }

    pub fn error(err: &RelayError) -> Self {
        OutboundFrame::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and integers cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

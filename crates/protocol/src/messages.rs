//! WebSocket message types for client-server communication
//!
//! Frames are JSON text discriminated by a `type` field. The client sends
//! `ClientMessage` and receives `ServerMessage`; anything the client cannot
//! decode is surfaced as `Inbound::Raw` so it can still be displayed.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::MAX_CHAT_TEXT_CHARS;

// =============================================================================
// Client Messages (client → server)
// =============================================================================

/// Messages from the client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A chat line for the current room
    Chat { text: String },
}

impl ClientMessage {
    pub fn chat(text: impl Into<String>) -> Self {
        Self::Chat { text: text.into() }
    }

    /// Serialize to the JSON text frame sent over the socket.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Serialize)
    }
}

// =============================================================================
// Server Messages (server → client)
// =============================================================================

/// Messages from the server to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Status notice (joins, leaves, server announcements)
    System {
        text: String,
        /// The server labels its own notices; not used for rendering
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
    },
    /// A chat line broadcast to the room
    Chat {
        sender: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
    },
}

impl ServerMessage {
    /// Strict decode of a text frame.
    ///
    /// Unknown `type` values, missing fields and non-JSON payloads are errors.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

/// A decoded inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Message(ServerMessage),
    /// Payload that did not decode as a `ServerMessage`, kept verbatim
    Raw(String),
}

/// Decode an inbound frame, falling back to the raw payload.
pub fn decode_inbound(payload: &str) -> Inbound {
    match ServerMessage::from_json(payload) {
        Ok(msg) => Inbound::Message(msg),
        Err(_) => Inbound::Raw(payload.to_string()),
    }
}

/// Check chat text against the server's schema before sending.
pub fn validate_chat_text(text: &str) -> Result<(), ProtocolError> {
    if text.is_empty() {
        return Err(ProtocolError::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_CHAT_TEXT_CHARS {
        return Err(ProtocolError::TextTooLong {
            len,
            max: MAX_CHAT_TEXT_CHARS,
        });
    }
    Ok(())
}

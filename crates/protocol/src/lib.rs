//! Roomchat Protocol - wire types for the room chat WebSocket endpoint
//!
//! This crate contains everything the client needs to agree on with the server:
//! - WebSocket message types (`ClientMessage`, `ServerMessage`)
//! - Lenient inbound decoding (`decode_inbound`) that never drops a frame
//! - Endpoint constants (path, query parameter names, defaults)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and thiserror
//! 2. **No UI logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets

pub mod error;
pub mod messages;

pub use error::ProtocolError;
pub use messages::{decode_inbound, validate_chat_text, ClientMessage, Inbound, ServerMessage};

// =============================================================================
// Endpoint constants
// =============================================================================

/// Path of the chat WebSocket endpoint on the server host.
pub const WS_PATH: &str = "/ws";

/// Query parameter carrying the display name.
pub const USERNAME_PARAM: &str = "username";

/// Query parameter carrying the room label.
pub const ROOM_PARAM: &str = "room";

/// Room used when the user leaves the room field blank.
pub const DEFAULT_ROOM: &str = "lobby";

/// Port the chat server listens on by default.
pub const DEFAULT_SERVER_PORT: u16 = 8004;

/// Longest chat text the server accepts, counted in chars.
pub const MAX_CHAT_TEXT_CHARS: usize = 2000;

/// Close code the server uses when a required query parameter is missing.
/// The close reason names the parameter.
pub const MISSING_PARAMETER_CLOSE_CODE: u16 = 4000;

//! Protocol errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("message text is empty")]
    EmptyText,

    #[error("message is too long ({len} characters, max {max})")]
    TextTooLong { len: usize, max: usize },
}

//! Socket Port - Outbound port for the chat WebSocket
//!
//! This port abstracts the real-time connection so the controller can open,
//! use and close it without depending on tokio-tungstenite or web-sys.
//! Transport events are not delivered through callbacks on the port; the
//! connector hands back a channel that the host pumps into the controller.

use futures_channel::mpsc::UnboundedReceiver;
use url::Url;

use crate::error::ChatError;

/// Ready state of a socket, numbered like the browser's `WebSocket.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    /// Handshake in progress
    Connecting,
    /// Frames can be sent
    Open,
    /// Close requested, waiting for the close handshake
    Closing,
    /// Closed, or never opened
    Closed,
}

impl SocketState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            SocketState::Connecting => 0,
            SocketState::Open => 1,
            SocketState::Closing => 2,
            SocketState::Closed => 3,
        }
    }

    /// Convert from u8 (atomic storage or `readyState`).
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => SocketState::Connecting,
            1 => SocketState::Open,
            2 => SocketState::Closing,
            _ => SocketState::Closed,
        }
    }
}

/// Something the transport reports about one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Handshake completed
    Opened,
    /// A text frame arrived
    Message(String),
    /// The connection is gone. Always the last event of a connection.
    Closed {
        code: Option<u16>,
        reason: Option<String>,
    },
    /// Transport failure; usually followed by `Closed`
    Error { message: Option<String> },
}

/// Event stream of one connection.
pub type SocketEvents = UnboundedReceiver<SocketEvent>;

/// One live connection.
///
/// Not `Send`: browser sockets live on the JS event loop.
pub trait SocketPort {
    fn state(&self) -> SocketState;

    /// Transmit one text frame. Fails unless the socket is open.
    fn send_text(&self, text: String) -> Result<(), ChatError>;

    /// Request closure. The `Closed` event reports completion.
    fn close(&self);
}

/// A freshly opened socket and the events it will produce.
pub struct OpenedSocket {
    pub socket: Box<dyn SocketPort>,
    pub events: SocketEvents,
}

/// Opens sockets.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SocketConnector: Send + Sync {
    /// Start connecting to `url`. Returns as soon as the attempt is underway.
    fn open(&self, url: &Url) -> Result<OpenedSocket, ChatError>;
}

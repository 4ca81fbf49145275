//! Outbound ports - Interfaces for the UI, the socket transport and platform services
//!
//! These ports define the contracts that UI and infrastructure adapters must
//! implement, so the controller can be driven the same way in the browser, on
//! the desktop and in tests.

pub mod chat_view_port;
pub mod platform;
pub mod socket_port;

pub use chat_view_port::{ChatView, LineStyle, LogLine};
pub use platform::RandomProvider;
pub use socket_port::{
    OpenedSocket, SocketConnector, SocketEvent, SocketEvents, SocketPort, SocketState,
};

#[cfg(any(test, feature = "testing"))]
pub use platform::MockRandomProvider;
#[cfg(any(test, feature = "testing"))]
pub use socket_port::MockSocketConnector;

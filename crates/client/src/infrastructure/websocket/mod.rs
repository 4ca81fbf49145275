//! WebSocket transports for the chat connection
//!
//! Platform-specific implementations are in submodules:
//! - `desktop`: tokio-tungstenite based client
//! - `wasm`: web-sys WebSocket based client

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

// Re-export platform-specific types with unified names
#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{DesktopConnector as PlatformConnector, DesktopSocket};

#[cfg(target_arch = "wasm32")]
pub use wasm::{WasmConnector as PlatformConnector, WasmSocket};

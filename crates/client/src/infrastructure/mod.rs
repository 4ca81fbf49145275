pub mod config;
pub mod platform;
pub mod websocket;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ClientConfig;
pub use platform::ThreadRandomProvider;

//! Application layer - connection control and log rendering

pub mod endpoint;
pub mod render;
pub mod services;

pub use endpoint::ServerEndpoint;

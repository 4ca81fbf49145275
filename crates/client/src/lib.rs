//! Roomchat client crate.
//!
//! This crate contains the chat controller, the UI, and the transport adapters.
//! Multi-platform support (browser and desktop) is provided via compile-time
//! `cfg` selection.

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use application::services::{ChatController, ConnectionEvents};
pub use application::ServerEndpoint;
pub use error::ChatError;
pub use ui::{app, ChatServices};

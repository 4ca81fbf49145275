use dioxus::prelude::*;
use std::sync::Arc;

use crate::application::endpoint::ServerEndpoint;
use crate::ports::outbound::{RandomProvider, SocketConnector};

pub mod chat_page;
pub mod view;

pub use chat_page::ChatPage;

/// Page stylesheet, shared by the web and desktop shells.
pub const STYLES: &str = include_str!("../../assets/css/chat.css");

/// Services the chat page needs, provided by the composition root
/// (see `crates/client/src/main.rs`).
#[derive(Clone)]
pub struct ChatServices {
    pub connector: Arc<dyn SocketConnector>,
    pub random: Arc<dyn RandomProvider>,
    pub endpoint: ServerEndpoint,
}

/// Hook to access the ChatServices from Dioxus context
pub fn use_chat_services() -> ChatServices {
    use_context::<ChatServices>()
}

pub fn app() -> Element {
    rsx! {
        // The desktop window gets the stylesheet through its custom head.
        if cfg!(target_arch = "wasm32") {
            style { "{STYLES}" }
        }
        ChatPage {}
    }
}

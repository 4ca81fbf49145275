//! `ChatView` backed by Dioxus signals

use dioxus::prelude::*;

use crate::ports::outbound::{ChatView, LogLine};

/// The chat page's state. Every field is a `Signal`, so the struct is `Copy`
/// and writes re-render the page.
#[derive(Clone, Copy)]
pub struct SignalChatView {
    pub username: Signal<String>,
    pub room: Signal<String>,
    pub message: Signal<String>,
    pub connect_enabled: Signal<bool>,
    pub disconnect_enabled: Signal<bool>,
    pub log: Signal<Vec<LogLine>>,
}

/// Create the view's signals. Must be called unconditionally from a component.
pub fn use_signal_chat_view() -> SignalChatView {
    SignalChatView {
        username: use_signal(String::new),
        room: use_signal(String::new),
        message: use_signal(String::new),
        connect_enabled: use_signal(|| true),
        disconnect_enabled: use_signal(|| false),
        log: use_signal(Vec::new),
    }
}

impl ChatView for SignalChatView {
    fn username_input(&self) -> String {
        self.username.read().clone()
    }

    fn room_input(&self) -> String {
        self.room.read().clone()
    }

    fn message_input(&self) -> String {
        self.message.read().clone()
    }

    fn clear_message_input(&mut self) {
        self.message.set(String::new());
    }

    fn set_connect_enabled(&mut self, enabled: bool) {
        self.connect_enabled.set(enabled);
    }

    fn set_disconnect_enabled(&mut self, enabled: bool) {
        self.disconnect_enabled.set(enabled);
    }

    fn append_line(&mut self, line: LogLine) {
        self.log.write().push(line);
    }
}

//! The chat page: identity/room controls, the log, and the send form.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::application::services::{ChatController, ConnectionEvents};
use crate::ui::use_chat_services;
use crate::ui::view::{use_signal_chat_view, SignalChatView};

type SharedController = Rc<RefCell<ChatController<SignalChatView>>>;

/// Open a connection and pump its events into the controller until the
/// stream ends.
fn start_connection(controller: &SharedController) {
    let Some(ConnectionEvents {
        generation,
        mut events,
    }) = controller.borrow_mut().connect()
    else {
        return;
    };

    let controller = Rc::clone(controller);
    spawn(async move {
        while let Some(event) = events.next().await {
            controller.borrow_mut().handle_event(generation, event);
        }
        tracing::debug!(generation, "Socket event stream ended");
    });
}

#[component]
pub fn ChatPage() -> Element {
    let services = use_chat_services();
    let view = use_signal_chat_view();

    let controller: SharedController = use_hook(move || {
        Rc::new(RefCell::new(ChatController::new(
            view,
            services.connector,
            services.random,
            services.endpoint,
        )))
    });

    let mut username = view.username;
    let mut room = view.room;
    let mut message = view.message;
    let connect_enabled = view.connect_enabled;
    let disconnect_enabled = view.disconnect_enabled;
    let log = view.log;

    let connect_controller = Rc::clone(&controller);
    let disconnect_controller = Rc::clone(&controller);
    let send_controller = Rc::clone(&controller);

    rsx! {
        div {
            class: "chat",

            h1 { "Room Chat" }

            div {
                class: "controls",
                input {
                    id: "username",
                    placeholder: "Display name (optional)",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    id: "room",
                    placeholder: "Room (lobby)",
                    value: "{room}",
                    oninput: move |e| room.set(e.value()),
                }
                button {
                    id: "connect",
                    disabled: !*connect_enabled.read(),
                    onclick: move |_| start_connection(&connect_controller),
                    "Connect"
                }
                button {
                    id: "disconnect",
                    disabled: !*disconnect_enabled.read(),
                    onclick: move |_| disconnect_controller.borrow_mut().disconnect(),
                    "Disconnect"
                }
            }

            div {
                id: "log",
                div {
                    class: "lines",
                    for (idx, line) in log.read().iter().enumerate() {
                        div {
                            key: "{idx}",
                            class: format!("line {}", line.style.css_class()),
                            if let Some(sender) = &line.sender {
                                b { "{sender}:" }
                                " "
                            }
                            "{line.text}"
                        }
                    }
                }
            }

            form {
                id: "sendForm",
                onsubmit: move |e| {
                    e.prevent_default();
                    send_controller.borrow_mut().send();
                },
                input {
                    id: "text",
                    placeholder: "Message",
                    autocomplete: "off",
                    value: "{message}",
                    oninput: move |e| message.set(e.value()),
                }
                button { r#type: "submit", "Send" }
            }
        }
    }
}

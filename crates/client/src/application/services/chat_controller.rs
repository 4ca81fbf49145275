//! Chat controller - binds the chat view to one live socket.
//!
//! The controller owns everything the page needs between events: the captured
//! identity and room, the current socket handle, and a generation counter.
//! User actions (`connect`, `disconnect`, `send`) are synchronous and return
//! immediately; transport events arrive later through `handle_event`, pumped
//! by the host from the stream `connect` hands back.

use std::sync::Arc;

use roomchat_protocol::{validate_chat_text, ClientMessage, DEFAULT_ROOM};

use crate::application::endpoint::ServerEndpoint;
use crate::application::render;
use crate::ports::outbound::{
    ChatView, LogLine, RandomProvider, SocketConnector, SocketEvent, SocketEvents, SocketPort,
    SocketState,
};

/// Upper bound (inclusive) of the number in a fallback identity.
const FALLBACK_IDENTITY_MAX: i32 = 999;

/// Events of the connection opened by `connect`, tagged with its generation.
pub struct ConnectionEvents {
    pub generation: u64,
    pub events: SocketEvents,
}

pub struct ChatController<V: ChatView> {
    view: V,
    connector: Arc<dyn SocketConnector>,
    random: Arc<dyn RandomProvider>,
    endpoint: ServerEndpoint,
    /// Bumped on every successful `connect`
    generation: u64,
    identity: Option<String>,
    room: Option<String>,
    socket: Option<Box<dyn SocketPort>>,
}

impl<V: ChatView> ChatController<V> {
    pub fn new(
        view: V,
        connector: Arc<dyn SocketConnector>,
        random: Arc<dyn RandomProvider>,
        endpoint: ServerEndpoint,
    ) -> Self {
        Self {
            view,
            connector,
            random,
            endpoint,
            generation: 0,
            identity: None,
            room: None,
            socket: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Identity captured by the last `connect`.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Room captured by the last `connect`.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `None` while no connection was ever opened.
    pub fn connection_state(&self) -> Option<SocketState> {
        self.socket.as_ref().map(|s| s.state())
    }

    /// Open a connection with the name and room currently in the view.
    ///
    /// Controls flip to "connected" right away, before the handshake
    /// completes. A previous socket is replaced without calling `close()`
    /// on it; its late events are dropped by generation.
    pub fn connect(&mut self) -> Option<ConnectionEvents> {
        let username = self.view.username_input().trim().to_string();
        let room = self.view.room_input().trim().to_string();

        let identity = if username.is_empty() {
            self.fallback_identity()
        } else {
            username
        };
        let room = if room.is_empty() {
            DEFAULT_ROOM.to_string()
        } else {
            room
        };

        let url = match self.endpoint.connection_url(&identity, &room) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, host = self.endpoint.host(), "Invalid server URL");
                self.view.append_line(render::error_line(Some(&e.to_string())));
                return None;
            }
        };

        tracing::info!(%identity, %room, %url, "Connecting to chat server");

        let opened = match self.connector.open(&url) {
            Ok(opened) => opened,
            Err(e) => {
                tracing::error!(error = %e, %url, "Failed to open socket");
                self.view.append_line(render::error_line(Some(&e.to_string())));
                return None;
            }
        };

        self.socket = Some(opened.socket);
        self.generation += 1;
        self.identity = Some(identity);
        self.room = Some(room);

        self.view.set_connect_enabled(false);
        self.view.set_disconnect_enabled(true);

        Some(ConnectionEvents {
            generation: self.generation,
            events: opened.events,
        })
    }

    /// Dispatch one transport event of connection `generation`.
    pub fn handle_event(&mut self, generation: u64, event: SocketEvent) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                ?event,
                "Dropping event from replaced connection"
            );
            return;
        }

        match event {
            SocketEvent::Opened => self.on_open(),
            SocketEvent::Message(payload) => self.on_message(&payload),
            SocketEvent::Closed { code, reason } => self.on_close(code, reason.as_deref()),
            SocketEvent::Error { message } => self.on_error(message.as_deref()),
        }
    }

    /// Request closure of the current connection. No-op without one.
    pub fn disconnect(&mut self) {
        match &self.socket {
            Some(socket) => {
                tracing::info!("Disconnect requested");
                socket.close();
            }
            None => tracing::debug!("Disconnect ignored: no connection"),
        }
    }

    /// Send the message field as a chat line.
    ///
    /// Silently does nothing for blank text or when the socket is not open.
    pub fn send(&mut self) {
        let text = self.view.message_input().trim().to_string();
        if text.is_empty() {
            return;
        }

        let Some(socket) = self.socket.as_ref() else {
            return;
        };
        if socket.state() != SocketState::Open {
            tracing::debug!(state = ?socket.state(), "Send ignored: socket not open");
            return;
        }

        if let Err(e) = validate_chat_text(&text) {
            self.view.append_line(LogLine::system(e.to_string()));
            return;
        }

        let frame = match ClientMessage::chat(text).to_json() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode chat message");
                self.view.append_line(render::error_line(Some(&e.to_string())));
                return;
            }
        };

        match socket.send_text(frame) {
            Ok(()) => self.view.clear_message_input(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send chat message");
                self.view.append_line(render::error_line(Some(&e.to_string())));
            }
        }
    }

    fn fallback_identity(&self) -> String {
        format!(
            "user_{}",
            self.random.random_range(0, FALLBACK_IDENTITY_MAX)
        )
    }

    fn on_open(&mut self) {
        let identity = self.identity.as_deref().unwrap_or_default();
        let room = self.room.as_deref().unwrap_or_default();
        tracing::info!(identity, room, "Connected");

        self.view.append_line(render::connected_line(identity, room));
        self.view.set_connect_enabled(false);
        self.view.set_disconnect_enabled(true);
    }

    fn on_message(&mut self, payload: &str) {
        let identity = self.identity.as_deref().unwrap_or_default();
        let line = render::render_inbound(payload, identity);
        self.view.append_line(line);
    }

    fn on_close(&mut self, code: Option<u16>, reason: Option<&str>) {
        tracing::info!(?code, ?reason, "Disconnected");

        self.view.append_line(render::disconnected_line(reason));
        self.view.set_connect_enabled(true);
        self.view.set_disconnect_enabled(false);
    }

    fn on_error(&mut self, message: Option<&str>) {
        tracing::warn!(?message, "Socket error");
        self.view.append_line(render::error_line(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use crate::infrastructure::testing::{FakeConnector, RecordingView};
    use crate::ports::outbound::{LineStyle, MockRandomProvider, MockSocketConnector};
    use roomchat_protocol::MAX_CHAT_TEXT_CHARS;

    fn random_returning(value: i32) -> Arc<MockRandomProvider> {
        let mut random = MockRandomProvider::new();
        random
            .expect_random_range()
            .withf(|min, max| *min == 0 && *max == 999)
            .returning(move |_, _| value);
        Arc::new(random)
    }

    fn build_controller(
        view: RecordingView,
        connector: Arc<FakeConnector>,
    ) -> ChatController<RecordingView> {
        ChatController::new(
            view,
            connector,
            random_returning(42),
            ServerEndpoint::new("localhost:8004", false),
        )
    }

    fn connected_controller(
        name: &str,
    ) -> (ChatController<RecordingView>, Arc<FakeConnector>, u64) {
        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.username = name.to_string();
        let mut controller = build_controller(view, Arc::clone(&connector));
        let events = controller.connect().unwrap();
        connector.last_socket().unwrap().set_state(SocketState::Open);
        controller.handle_event(events.generation, SocketEvent::Opened);
        (controller, connector, events.generation)
    }

    #[test]
    fn test_blank_fields_use_fallback_identity_and_lobby() {
        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.username = "   ".into();
        view.room = "".into();
        let mut controller = build_controller(view, Arc::clone(&connector));

        let events = controller.connect();

        assert!(events.is_some());
        assert_eq!(controller.identity(), Some("user_42"));
        assert_eq!(controller.room(), Some("lobby"));
        assert!(!controller.view().connect_enabled);
        assert!(controller.view().disconnect_enabled);
        assert_eq!(
            connector.urls()[0].as_str(),
            "ws://localhost:8004/ws?username=user_42&room=lobby"
        );
    }

    #[test]
    fn test_fallback_identity_stays_in_range() {
        for value in [0, 999] {
            let connector = Arc::new(FakeConnector::new());
            let mut controller = ChatController::new(
                RecordingView::new(),
                connector,
                random_returning(value),
                ServerEndpoint::new("localhost:8004", false),
            );
            controller.connect();
            assert_eq!(controller.identity(), Some(format!("user_{}", value).as_str()));
        }
    }

    #[test]
    fn test_connect_trims_inputs() {
        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.username = "  alice ".into();
        view.room = " dev ".into();
        let mut controller = build_controller(view, Arc::clone(&connector));

        controller.connect();

        assert_eq!(controller.identity(), Some("alice"));
        assert_eq!(controller.room(), Some("dev"));
        assert_eq!(controller.connection_state(), Some(SocketState::Connecting));
    }

    #[test]
    fn test_open_appends_connected_line() {
        let (controller, _, _) = connected_controller("alice");

        let line = controller.view().last_line().unwrap();
        assert_eq!(line.style, LineStyle::System);
        assert_eq!(line.text, "Connected as alice to lobby");
        assert!(!controller.view().connect_enabled);
        assert!(controller.view().disconnect_enabled);
    }

    #[test]
    fn test_chat_from_other_is_styled_other() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(
            generation,
            SocketEvent::Message(r#"{"type":"chat","sender":"bob","text":"hi"}"#.into()),
        );

        let line = controller.view().last_line().unwrap();
        assert_eq!(line.to_string(), "bob: hi");
        assert_eq!(line.style, LineStyle::Other);
    }

    #[test]
    fn test_own_chat_is_styled_mine() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(
            generation,
            SocketEvent::Message(r#"{"type":"chat","sender":"alice","text":"yo"}"#.into()),
        );

        assert_eq!(controller.view().last_line().unwrap().style, LineStyle::Mine);
    }

    #[test]
    fn test_garbage_frame_is_shown_raw() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(generation, SocketEvent::Message("ping?".into()));

        let line = controller.view().last_line().unwrap();
        assert_eq!(line.style, LineStyle::System);
        assert!(line.text.contains("ping?"));
    }

    #[test]
    fn test_close_reenables_connect() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(
            generation,
            SocketEvent::Closed {
                code: Some(1000),
                reason: None,
            },
        );

        assert_eq!(controller.view().last_line().unwrap().text, "Disconnected");
        assert!(controller.view().connect_enabled);
        assert!(!controller.view().disconnect_enabled);
    }

    #[test]
    fn test_close_reason_is_shown() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(
            generation,
            SocketEvent::Closed {
                code: Some(4000),
                reason: Some("Missing query parameter: username".into()),
            },
        );

        assert_eq!(
            controller.view().last_line().unwrap().text,
            "Disconnected: Missing query parameter: username"
        );
    }

    #[test]
    fn test_error_event_with_and_without_message() {
        let (mut controller, _, generation) = connected_controller("alice");

        controller.handle_event(
            generation,
            SocketEvent::Error {
                message: Some("connection reset".into()),
            },
        );
        assert_eq!(
            controller.view().last_line().unwrap().text,
            "Error: connection reset"
        );

        controller.handle_event(generation, SocketEvent::Error { message: None });
        assert_eq!(controller.view().last_line().unwrap().text, "Error");
    }

    #[test]
    fn test_send_transmits_chat_frame_and_clears_input() {
        let (mut controller, connector, _) = connected_controller("alice");
        controller.view.message = "  hello there  ".into();

        controller.send();

        let socket = connector.last_socket().unwrap();
        assert_eq!(socket.sent(), vec![r#"{"type":"chat","text":"hello there"}"#]);
        assert!(controller.view().message.is_empty());
    }

    #[test]
    fn test_send_whitespace_is_noop() {
        let (mut controller, connector, _) = connected_controller("alice");
        controller.view.message = " \t ".into();
        let lines_before = controller.view().lines.len();

        controller.send();

        assert!(connector.last_socket().unwrap().sent().is_empty());
        assert_eq!(controller.view().lines.len(), lines_before);
    }

    #[test]
    fn test_send_without_connection_is_noop() {
        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.message = "hello".into();
        let mut controller = build_controller(view, Arc::clone(&connector));

        controller.send();

        assert!(connector.urls().is_empty());
        assert!(controller.view().lines.is_empty());
        assert_eq!(controller.view().message, "hello");
    }

    #[test]
    fn test_send_before_open_is_noop() {
        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.message = "too early".into();
        let mut controller = build_controller(view, Arc::clone(&connector));
        controller.connect();

        controller.send();

        assert!(connector.last_socket().unwrap().sent().is_empty());
        assert_eq!(controller.view().message, "too early");
    }

    #[test]
    fn test_send_after_close_is_noop() {
        let (mut controller, connector, generation) = connected_controller("alice");
        let socket = connector.last_socket().unwrap();
        socket.set_state(SocketState::Closed);
        controller.handle_event(
            generation,
            SocketEvent::Closed {
                code: None,
                reason: None,
            },
        );
        controller.view.message = "anyone?".into();

        controller.send();

        assert!(socket.sent().is_empty());
    }

    #[test]
    fn test_overlong_message_is_not_sent() {
        let (mut controller, connector, _) = connected_controller("alice");
        let text = "a".repeat(MAX_CHAT_TEXT_CHARS + 1);
        controller.view.message = text.clone();

        controller.send();

        assert!(connector.last_socket().unwrap().sent().is_empty());
        assert_eq!(controller.view().message, text);
        let line = controller.view().last_line().unwrap();
        assert_eq!(line.style, LineStyle::System);
        assert!(line.text.contains("too long"));
    }

    #[test]
    fn test_transport_send_failure_keeps_input() {
        let (mut controller, connector, _) = connected_controller("alice");
        connector.last_socket().unwrap().fail_sends();
        controller.view.message = "hello".into();

        controller.send();

        assert_eq!(controller.view().message, "hello");
        assert!(controller
            .view()
            .last_line()
            .unwrap()
            .text
            .starts_with("Error: "));
    }

    #[test]
    fn test_disconnect_closes_socket() {
        let (mut controller, connector, _) = connected_controller("alice");

        controller.disconnect();

        assert_eq!(connector.last_socket().unwrap().close_calls(), 1);
    }

    #[test]
    fn test_disconnect_without_connection_is_noop() {
        let connector = Arc::new(FakeConnector::new());
        let mut controller = build_controller(RecordingView::new(), connector);

        controller.disconnect();

        assert!(controller.view().lines.is_empty());
        assert_eq!(controller.connection_state(), None);
    }

    #[test]
    fn test_second_connect_replaces_socket_and_drops_stale_events() {
        let (mut controller, connector, first_generation) = connected_controller("alice");
        let first_socket = connector.last_socket().unwrap();

        let second = controller.connect().unwrap();
        let lines_before = controller.view().lines.len();

        assert_eq!(second.generation, first_generation + 1);
        assert_eq!(connector.urls().len(), 2);
        assert_eq!(first_socket.close_calls(), 0);

        controller.handle_event(
            first_generation,
            SocketEvent::Closed {
                code: None,
                reason: None,
            },
        );

        assert_eq!(controller.view().lines.len(), lines_before);
        assert!(!controller.view().connect_enabled);
    }

    #[tokio::test]
    async fn test_events_pumped_from_stream() {
        use futures_util::StreamExt;

        let connector = Arc::new(FakeConnector::new());
        let mut view = RecordingView::new();
        view.username = "alice".into();
        view.room = "dev".into();
        let mut controller = build_controller(view, Arc::clone(&connector));
        let ConnectionEvents {
            generation,
            mut events,
        } = controller.connect().unwrap();

        assert!(connector.emit(SocketEvent::Opened));
        assert!(connector.emit(SocketEvent::Message(
            r#"{"type":"system","text":"bob joined","room":"dev"}"#.into()
        )));
        assert!(connector.emit(SocketEvent::Closed {
            code: Some(1000),
            reason: None,
        }));

        for _ in 0..3 {
            let event = events.next().await.unwrap();
            controller.handle_event(generation, event);
        }

        let texts: Vec<String> = controller
            .view()
            .lines
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Connected as alice to dev".to_string(),
                "🛈 bob joined".to_string(),
                "Disconnected".to_string(),
            ]
        );
        assert!(controller.view().connect_enabled);
    }

    #[test]
    fn test_connector_failure_leaves_controls_alone() {
        let mut connector = MockSocketConnector::new();
        connector
            .expect_open()
            .returning(|_| Err(ChatError::Transport("refused".into())));
        let mut controller = ChatController::new(
            RecordingView::new(),
            Arc::new(connector),
            random_returning(7),
            ServerEndpoint::new("localhost:8004", false),
        );

        assert!(controller.connect().is_none());
        assert!(controller.view().connect_enabled);
        assert!(!controller.view().disconnect_enabled);
        assert_eq!(
            controller.view().last_line().unwrap().text,
            "Error: transport error: refused"
        );
        assert_eq!(controller.generation(), 0);
    }
}

//! Test doubles for the view and the socket transport.
//!
//! `RecordingView` keeps the page in plain fields, `FakeConnector` hands out
//! `FakeSocket`s whose state tests can drive and whose sent frames they can
//! inspect.

use std::sync::{Arc, Mutex, MutexGuard};

use futures_channel::mpsc::{self, UnboundedSender};
use url::Url;

use crate::error::ChatError;
use crate::ports::outbound::{
    ChatView, LogLine, OpenedSocket, SocketConnector, SocketEvent, SocketPort, SocketState,
};

/// In-memory chat page. Starts like the real page: connect enabled,
/// disconnect disabled, empty fields.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub username: String,
    pub room: String,
    pub message: String,
    pub connect_enabled: bool,
    pub disconnect_enabled: bool,
    pub lines: Vec<LogLine>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            room: String::new(),
            message: String::new(),
            connect_enabled: true,
            disconnect_enabled: false,
            lines: Vec::new(),
        }
    }

    pub fn last_line(&self) -> Option<&LogLine> {
        self.lines.last()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for RecordingView {
    fn username_input(&self) -> String {
        self.username.clone()
    }

    fn room_input(&self) -> String {
        self.room.clone()
    }

    fn message_input(&self) -> String {
        self.message.clone()
    }

    fn clear_message_input(&mut self) {
        self.message.clear();
    }

    fn set_connect_enabled(&mut self, enabled: bool) {
        self.connect_enabled = enabled;
    }

    fn set_disconnect_enabled(&mut self, enabled: bool) {
        self.disconnect_enabled = enabled;
    }

    fn append_line(&mut self, line: LogLine) {
        self.lines.push(line);
    }
}

// =============================================================================
// FakeSocket
// =============================================================================

struct FakeSocketInner {
    state: SocketState,
    sent: Vec<String>,
    close_calls: usize,
    fail_sends: bool,
}

/// Socket double. Clones share state.
#[derive(Clone)]
pub struct FakeSocket {
    inner: Arc<Mutex<FakeSocketInner>>,
}

impl FakeSocket {
    pub fn new(state: SocketState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeSocketInner {
                state,
                sent: Vec::new(),
                close_calls: 0,
                fail_sends: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeSocketInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_state(&self, state: SocketState) {
        self.lock().state = state;
    }

    /// Frames accepted by `send_text`, in order.
    pub fn sent(&self) -> Vec<String> {
        self.lock().sent.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.lock().close_calls
    }

    /// Make every following `send_text` fail.
    pub fn fail_sends(&self) {
        self.lock().fail_sends = true;
    }
}

impl SocketPort for FakeSocket {
    fn state(&self) -> SocketState {
        self.lock().state
    }

    fn send_text(&self, text: String) -> Result<(), ChatError> {
        let mut inner = self.lock();
        if inner.fail_sends {
            return Err(ChatError::Transport("socket write failed".into()));
        }
        inner.sent.push(text);
        Ok(())
    }

    fn close(&self) {
        let mut inner = self.lock();
        inner.close_calls += 1;
        if matches!(inner.state, SocketState::Connecting | SocketState::Open) {
            inner.state = SocketState::Closing;
        }
    }
}

// =============================================================================
// FakeConnector
// =============================================================================

struct OpenedRecord {
    url: Url,
    socket: FakeSocket,
    events: UnboundedSender<SocketEvent>,
}

/// Connector double. Every `open` succeeds with a new `FakeSocket` in the
/// `Connecting` state.
#[derive(Default)]
pub struct FakeConnector {
    opened: Mutex<Vec<OpenedRecord>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OpenedRecord>> {
        self.opened.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// URLs passed to `open`, in order.
    pub fn urls(&self) -> Vec<Url> {
        self.lock().iter().map(|r| r.url.clone()).collect()
    }

    pub fn last_socket(&self) -> Option<FakeSocket> {
        self.lock().last().map(|r| r.socket.clone())
    }

    /// Push an event into the stream of the most recent socket.
    pub fn emit(&self, event: SocketEvent) -> bool {
        self.lock()
            .last()
            .map(|r| r.events.unbounded_send(event).is_ok())
            .unwrap_or(false)
    }
}

impl SocketConnector for FakeConnector {
    fn open(&self, url: &Url) -> Result<OpenedSocket, ChatError> {
        let socket = FakeSocket::new(SocketState::Connecting);
        let (tx, rx) = mpsc::unbounded();
        self.lock().push(OpenedRecord {
            url: url.clone(),
            socket: socket.clone(),
            events: tx,
        });
        Ok(OpenedSocket {
            socket: Box::new(socket),
            events: rx,
        })
    }
}

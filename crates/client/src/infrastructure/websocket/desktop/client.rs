//! Desktop WebSocket client using tokio-tungstenite

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures_channel::mpsc::{self as event_channel, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::error::ChatError;
use crate::ports::outbound::{OpenedSocket, SocketConnector, SocketEvent, SocketPort, SocketState};

/// Commands from the socket handle to its I/O task
#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Opens tokio-tungstenite sockets.
///
/// Must be used from within a tokio runtime; each socket runs on its own task.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopConnector;

impl SocketConnector for DesktopConnector {
    fn open(&self, url: &Url) -> Result<OpenedSocket, ChatError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ChatError::Transport(format!("no tokio runtime: {}", e)))?;

        let (event_tx, event_rx) = event_channel::unbounded();
        let (out_tx, out_rx) = mpsc::unbounded_channel::<Outbound>();
        let state = Arc::new(AtomicU8::new(SocketState::Connecting.to_u8()));

        runtime.spawn(socket_task(
            url.to_string(),
            Arc::clone(&state),
            event_tx,
            out_rx,
        ));

        Ok(OpenedSocket {
            socket: Box::new(DesktopSocket {
                state,
                outbound: out_tx,
            }),
            events: event_rx,
        })
    }
}

/// Handle to one desktop socket. Dropping it closes the connection.
pub struct DesktopSocket {
    state: Arc<AtomicU8>,
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl SocketPort for DesktopSocket {
    fn state(&self) -> SocketState {
        SocketState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn send_text(&self, text: String) -> Result<(), ChatError> {
        if self.state() != SocketState::Open {
            return Err(ChatError::Transport("socket is not open".into()));
        }
        self.outbound
            .send(Outbound::Text(text))
            .map_err(|_| ChatError::Transport("socket task has stopped".into()))
    }

    fn close(&self) {
        if matches!(self.state(), SocketState::Closing | SocketState::Closed) {
            return;
        }
        if self.outbound.send(Outbound::Close).is_err() {
            tracing::debug!("Close requested after socket task stopped");
        }
    }
}

fn set_state(state: &AtomicU8, new_state: SocketState) {
    state.store(new_state.to_u8(), Ordering::SeqCst);
}

fn emit(events: &UnboundedSender<SocketEvent>, event: SocketEvent) {
    // The receiver goes away when the UI stops pumping; nothing left to tell.
    let _ = events.unbounded_send(event);
}

/// Resolves once the handle asks for closure or is dropped.
async fn close_requested(outbound: &mut mpsc::UnboundedReceiver<Outbound>) {
    while let Some(cmd) = outbound.recv().await {
        if matches!(cmd, Outbound::Close) {
            return;
        }
    }
}

async fn socket_task(
    url: String,
    state: Arc<AtomicU8>,
    events: UnboundedSender<SocketEvent>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
) {
    let ws_stream = tokio::select! {
        result = connect_async(url.as_str()) => match result {
            Ok((ws_stream, _response)) => ws_stream,
            Err(e) => {
                tracing::error!(%url, error = %e, "WebSocket handshake failed");
                emit(&events, SocketEvent::Error { message: Some(e.to_string()) });
                finish(&state, &events, None, None);
                return;
            }
        },
        _ = close_requested(&mut outbound) => {
            tracing::info!(%url, "Closed before handshake completed");
            finish(&state, &events, None, None);
            return;
        }
    };

    tracing::info!(%url, "Connected to chat server");
    set_state(&state, SocketState::Open);
    emit(&events, SocketEvent::Opened);

    let (mut write, mut read) = ws_stream.split();
    let mut closing = false;
    let mut close_code = None;
    let mut close_reason = None;

    loop {
        tokio::select! {
            cmd = outbound.recv(), if !closing => match cmd {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        tracing::error!(error = %e, "Failed to send frame");
                        emit(&events, SocketEvent::Error { message: Some(e.to_string()) });
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    closing = true;
                    set_state(&state, SocketState::Closing);
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::warn!(error = %e, "Failed to send close frame");
                        break;
                    }
                }
            },
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => emit(&events, SocketEvent::Message(text)),
                Some(Ok(Message::Close(frame))) => {
                    if let Some(frame) = frame {
                        close_code = Some(u16::from(frame.code));
                        close_reason = Some(frame.reason.into_owned());
                    }
                    set_state(&state, SocketState::Closing);
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::debug!(len = data.len(), "Ignoring binary frame");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "WebSocket error");
                    emit(&events, SocketEvent::Error { message: Some(e.to_string()) });
                    break;
                }
                None => break,
            }
        }
    }

    finish(&state, &events, close_code, close_reason);
}

fn finish(
    state: &AtomicU8,
    events: &UnboundedSender<SocketEvent>,
    code: Option<u16>,
    reason: Option<String>,
) {
    set_state(state, SocketState::Closed);
    emit(
        events,
        SocketEvent::Closed {
            code,
            reason: reason.filter(|r| !r.is_empty()),
        },
    );
}

//! WASM WebSocket client using web-sys

use futures_channel::mpsc::{self, UnboundedSender};
use url::Url;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::error::ChatError;
use crate::ports::outbound::{OpenedSocket, SocketConnector, SocketEvent, SocketPort, SocketState};

/// Opens browser WebSockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmConnector;

impl SocketConnector for WasmConnector {
    fn open(&self, url: &Url) -> Result<OpenedSocket, ChatError> {
        let (events_tx, events_rx) = mpsc::unbounded();
        let socket = WasmSocket::connect(url.as_str(), events_tx)?;
        Ok(OpenedSocket {
            socket: Box::new(socket),
            events: events_rx,
        })
    }
}

/// Handle to one browser WebSocket.
///
/// Owns the JS callbacks; dropping the handle detaches them and closes the
/// socket, so no callback outlives its closure.
pub struct WasmSocket {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

fn js_error(value: JsValue) -> ChatError {
    ChatError::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

fn emit(events: &UnboundedSender<SocketEvent>, event: SocketEvent) {
    let _ = events.unbounded_send(event);
}

impl WasmSocket {
    fn connect(url: &str, events: UnboundedSender<SocketEvent>) -> Result<Self, ChatError> {
        let ws = WebSocket::new(url).map_err(js_error)?;

        let on_open = {
            let events = events.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                emit(&events, SocketEvent::Opened);
            })
        };
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = {
            let events = events.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
                match e.data().as_string() {
                    Some(text) => emit(&events, SocketEvent::Message(text)),
                    None => tracing::debug!("Ignoring non-text frame"),
                }
            })
        };
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_close = {
            let events = events.clone();
            Closure::<dyn FnMut(CloseEvent)>::new(move |e: CloseEvent| {
                let reason = e.reason();
                emit(
                    &events,
                    SocketEvent::Closed {
                        code: Some(e.code()),
                        reason: Some(reason).filter(|r| !r.is_empty()),
                    },
                );
            })
        };
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        // Browsers fire a plain `Event` for socket errors; only an
        // `ErrorEvent` carries a message.
        let on_error = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let message = e
                .dyn_ref::<ErrorEvent>()
                .map(|err| err.message())
                .filter(|m| !m.is_empty());
            emit(&events, SocketEvent::Error { message });
        });
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        tracing::info!(url, "Opening WebSocket");

        Ok(Self {
            ws,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }
}

impl SocketPort for WasmSocket {
    fn state(&self) -> SocketState {
        SocketState::from_u8(self.ws.ready_state() as u8)
    }

    fn send_text(&self, text: String) -> Result<(), ChatError> {
        self.ws.send_with_str(&text).map_err(js_error)
    }

    fn close(&self) {
        if let Err(e) = self.ws.close() {
            tracing::warn!(error = ?e, "Failed to close WebSocket");
        }
    }
}

impl Drop for WasmSocket {
    fn drop(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        if matches!(self.state(), SocketState::Connecting | SocketState::Open) {
            let _ = self.ws.close();
        }
    }
}

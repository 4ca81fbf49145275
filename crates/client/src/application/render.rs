//! Turns inbound frames and connection lifecycle into log lines.

use roomchat_protocol::{decode_inbound, Inbound, ServerMessage};

use crate::ports::outbound::{LineStyle, LogLine};

/// Prefix of server status notices.
pub const SYSTEM_GLYPH: &str = "🛈";

/// Render one inbound text frame.
///
/// Never drops a frame: anything that does not decode is shown raw.
pub fn render_inbound(payload: &str, identity: &str) -> LogLine {
    match decode_inbound(payload) {
        Inbound::Message(ServerMessage::System { text, .. }) => {
            LogLine::system(format!("{} {}", SYSTEM_GLYPH, text))
        }
        Inbound::Message(ServerMessage::Chat { sender, text, .. }) => {
            let style = if sender == identity {
                LineStyle::Mine
            } else {
                LineStyle::Other
            };
            LogLine::chat(sender, text, style)
        }
        Inbound::Raw(raw) => {
            tracing::debug!(len = raw.len(), "Inbound frame did not decode, showing raw");
            LogLine::system(format!("(raw) {}", raw))
        }
    }
}

pub fn connected_line(identity: &str, room: &str) -> LogLine {
    LogLine::system(format!("Connected as {} to {}", identity, room))
}

pub fn disconnected_line(reason: Option<&str>) -> LogLine {
    match reason.filter(|r| !r.is_empty()) {
        Some(reason) => LogLine::system(format!("Disconnected: {}", reason)),
        None => LogLine::system("Disconnected"),
    }
}

pub fn error_line(message: Option<&str>) -> LogLine {
    match message.filter(|m| !m.is_empty()) {
        Some(message) => LogLine::system(format!("Error: {}", message)),
        None => LogLine::system("Error"),
    }
}

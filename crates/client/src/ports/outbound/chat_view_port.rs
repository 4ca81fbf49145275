//! Chat View Port - the page the controller reads input from and renders into
//!
//! The view owns the input fields, the connect/disconnect controls and the
//! append-only log. The controller never keeps its own copy of any of them.

use std::fmt;

/// How a log line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Status notices, raw fallbacks and errors
    System,
    /// Chat lines sent under the local identity
    Mine,
    /// Chat lines from other participants
    Other,
}

impl LineStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            LineStyle::System => "sys",
            LineStyle::Mine => "me",
            LineStyle::Other => "other",
        }
    }
}

/// One rendered line of the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub style: LineStyle,
    /// Present on chat lines only; rendered as a `<sender>:` prefix
    pub sender: Option<String>,
    pub text: String,
}

impl LogLine {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            style: LineStyle::System,
            sender: None,
            text: text.into(),
        }
    }

    pub fn chat(sender: impl Into<String>, text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            style,
            sender: Some(sender.into()),
            text: text.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sender {
            Some(sender) => write!(f, "{}: {}", sender, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// The chat page as seen by the controller.
pub trait ChatView {
    /// Current content of the display name field (untrimmed)
    fn username_input(&self) -> String;

    /// Current content of the room field (untrimmed)
    fn room_input(&self) -> String;

    /// Current content of the message field (untrimmed)
    fn message_input(&self) -> String;

    fn clear_message_input(&mut self);

    fn set_connect_enabled(&mut self, enabled: bool);

    fn set_disconnect_enabled(&mut self, enabled: bool);

    /// Append a line to the log. Lines are never removed.
    fn append_line(&mut self, line: LogLine);
}

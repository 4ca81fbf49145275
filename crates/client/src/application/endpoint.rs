//! Server endpoint and connection URL construction

use roomchat_protocol::{ROOM_PARAM, USERNAME_PARAM, WS_PATH};
use url::Url;

use crate::error::ChatError;

/// Where the chat server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    secure: bool,
}

impl ServerEndpoint {
    /// `host` may carry a port (`localhost:8004`).
    pub fn new(host: impl Into<String>, secure: bool) -> Self {
        Self {
            host: host.into(),
            secure,
        }
    }

    /// Build from a page location. An `https:` page gets a `wss` endpoint.
    pub fn from_location(protocol: &str, host: &str) -> Self {
        Self::new(host, protocol.eq_ignore_ascii_case("https:"))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "wss"
        } else {
            "ws"
        }
    }

    /// `ws[s]://<host>/ws?username=<identity>&room=<room>`, both values URL encoded.
    pub fn connection_url(&self, identity: &str, room: &str) -> Result<Url, ChatError> {
        let mut url = Url::parse(&format!("{}://{}{}", self.scheme(), self.host, WS_PATH))?;
        url.query_pairs_mut()
            .append_pair(USERNAME_PARAM, identity)
            .append_pair(ROOM_PARAM, room);
        Ok(url)
    }
}

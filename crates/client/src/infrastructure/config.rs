//! Client configuration
//!
//! Desktop builds read the environment (with `.env.local` / `.env` from the
//! workspace root loaded first). Browser builds take the server host from the
//! page they were served from.

use roomchat_protocol::DEFAULT_SERVER_PORT;

use crate::application::endpoint::ServerEndpoint;

pub const SERVER_HOST_VAR: &str = "ROOMCHAT_SERVER_HOST";
pub const SECURE_VAR: &str = "ROOMCHAT_SECURE";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

pub const DEFAULT_LOG_FILTER: &str = "roomchat_client=debug,dioxus=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host[:port]` of the chat server
    pub server_host: String,
    /// Use `wss` instead of `ws`
    pub secure: bool,
    /// `tracing-subscriber` filter directive (desktop only)
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: format!("localhost:{}", DEFAULT_SERVER_PORT),
            secure: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::new(self.server_host.clone(), self.secure)
    }

    /// Build from a variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            server_host: get(SERVER_HOST_VAR).unwrap_or(defaults.server_host),
            secure: get(SECURE_VAR)
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.secure),
            log_filter: get(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        load_dotenv_from_repo_root();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Take the server host from `window.location`.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Result<Self, crate::error::ChatError> {
        use crate::error::ChatError;

        let location = web_sys::window()
            .ok_or_else(|| ChatError::Transport("no window".into()))?
            .location();
        let js = |e: wasm_bindgen::JsValue| ChatError::Transport(format!("{:?}", e));
        let protocol = location.protocol().map_err(js)?;
        let host = location.host().map_err(js)?;

        Ok(Self {
            server_host: host,
            secure: protocol.eq_ignore_ascii_case("https:"),
            ..Self::default()
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

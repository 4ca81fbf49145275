//! Roomchat client - composition root binary.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomchat_client::infrastructure::websocket::PlatformConnector;
use roomchat_client::infrastructure::{ClientConfig, ThreadRandomProvider};
use roomchat_client::ChatServices;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    let config = ClientConfig::from_env();

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    let config = {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        ClientConfig::from_window().unwrap_or_else(|e| {
            tracing::error!("Failed to read page location, using defaults: {}", e);
            ClientConfig::default()
        })
    };

    tracing::info!(
        server_host = %config.server_host,
        secure = config.secure,
        "Starting Roomchat client"
    );

    let services = ChatServices {
        connector: Arc::new(PlatformConnector),
        random: Arc::new(ThreadRandomProvider),
        endpoint: config.endpoint(),
    };

    // Launch Dioxus
    #[allow(unused_mut)]
    let mut builder = dioxus::LaunchBuilder::new();

    #[cfg(not(target_arch = "wasm32"))]
    {
        let head = format!("<style>{}</style>", roomchat_client::ui::STYLES);
        let cfg = dioxus_desktop::Config::new()
            .with_custom_head(head)
            .with_window(dioxus_desktop::WindowBuilder::new().with_title("Room Chat"));
        builder = builder.with_cfg(cfg);
    }

    builder.with_context(services).launch(roomchat_client::app);
}

//! chat-relay server entry point.
//!
//! Starts the Axum HTTP server with the long-poll session endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chat_relay::api;
use chat_relay::app_state::AppState;
use chat_relay::config::ChatConfig;
use chat_relay::domain::{Broadcaster, ParticipantRegistry};
use chat_relay::service::ChatService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ChatConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        poll_timeout_secs = config.poll_timeout_secs,
        mailbox_capacity = config.mailbox_capacity,
        "starting chat-relay"
    );

    // Build domain layer
    let registry = Arc::new(ParticipantRegistry::new(config.mailbox_capacity));
    let (broadcaster, _dispatch) = Broadcaster::spawn(Arc::clone(&registry));

    // Build service layer
    let chat_service = Arc::new(ChatService::new(registry, broadcaster));

    // Build application state
    let app_state = AppState {
        chat_service,
        poll_timeout: config.poll_timeout(),
    };

    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

//! Shared application state injected into all Axum handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::service::ChatService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat service for all session operations.
    pub chat_service: Arc<ChatService>,
    /// How long a `/messages` long poll waits.
    pub poll_timeout: Duration,
}

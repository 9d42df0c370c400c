//! Single broadcast stream and its dispatch loop.
//!
//! [`Broadcaster`] wraps the sending half of an unbounded
//! [`tokio::sync::mpsc`] channel. Exactly one dispatch task drains it and
//! fans each message out to every mailbox in the
//! [`ParticipantRegistry`], one message at a time, in enqueue order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{ChatMessage, ParticipantRegistry};
use crate::error::ChatError;

/// Cloneable handle onto the broadcast stream.
///
/// Publishing never waits for fan-out. The dispatch loop exits once every
/// handle has been dropped.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    sender: mpsc::UnboundedSender<ChatMessage>,
}

impl Broadcaster {
    /// Creates the broadcast stream and spawns its dispatch loop.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(registry: Arc<ParticipantRegistry>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(dispatch(receiver, registry));
        (Self { sender }, handle)
    }

    /// Enqueues `message` for fan-out and returns immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Internal`] if the dispatch loop is no longer
    /// running.
    pub fn publish(&self, message: ChatMessage) -> Result<(), ChatError> {
        self.sender
            .send(message)
            .map_err(|_| ChatError::Internal("broadcast dispatch loop stopped".to_string()))
    }
}

/// Drains the stream, fanning each message out before taking the next.
async fn dispatch(
    mut receiver: mpsc::UnboundedReceiver<ChatMessage>,
    registry: Arc<ParticipantRegistry>,
) {
    while let Some(message) = receiver.recv().await {
        let report = registry.fan_out(&message).await;
        tracing::debug!(
            delivered = report.delivered,
            dropped = report.dropped,
            "message fanned out"
        );
    }
    tracing::warn!("broadcast stream closed, dispatch loop exiting");
}

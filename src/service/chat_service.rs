//! Chat service: the participant-facing join/send/leave/receive contract.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Broadcaster, ChatMessage, Delivery, ParticipantId, ParticipantRegistry};
use crate::error::ChatError;

/// Orchestration layer for all session operations.
///
/// Owns a shared handle to the [`ParticipantRegistry`] and a
/// [`Broadcaster`] handle. Every operation validates its input first,
/// then touches the registry under its lock only for the structural
/// access, and never waits on a mailbox while holding it.
#[derive(Debug, Clone)]
pub struct ChatService {
    registry: Arc<ParticipantRegistry>,
    broadcaster: Broadcaster,
}

impl ChatService {
    /// Creates a new `ChatService`.
    #[must_use]
    pub fn new(registry: Arc<ParticipantRegistry>, broadcaster: Broadcaster) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Returns a reference to the inner [`ParticipantRegistry`].
    #[must_use]
    pub(crate) fn registry(&self) -> &Arc<ParticipantRegistry> {
        &self.registry
    }

    /// Joins `id`, replacing any mailbox it already had.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidInput`] if `id` is empty.
    pub async fn join(&self, id: &str) -> Result<ParticipantId, ChatError> {
        let id = ParticipantId::parse(id)?;
        let replaced = self.registry.add(id.clone()).await;
        tracing::info!(participant = %id, replaced, "participant joined");
        Ok(id)
    }

    /// Broadcasts `text` from `id` to every joined participant, the sender
    /// included.
    ///
    /// Returns as soon as the message is enqueued; delivery is best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidInput`] if `id` or `text` is empty and
    /// [`ChatError::UnknownParticipant`] if `id` has not joined.
    pub async fn send(&self, id: &str, text: &str) -> Result<ParticipantId, ChatError> {
        let id = ParticipantId::parse(id)?;
        if text.is_empty() {
            return Err(ChatError::InvalidInput("message is required".to_string()));
        }
        self.registry.lookup(&id).await?;

        self.broadcaster.publish(ChatMessage::compose(&id, text))?;
        tracing::debug!(participant = %id, "message enqueued");
        Ok(id)
    }

    /// Removes `id`, waking any receive pending on its mailbox. Unknown
    /// ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidInput`] if `id` is empty.
    pub async fn leave(&self, id: &str) -> Result<ParticipantId, ChatError> {
        let id = ParticipantId::parse(id)?;
        let existed = self.registry.remove(&id).await;
        tracing::info!(participant = %id, existed, "participant left");
        Ok(id)
    }

    /// Waits up to `timeout` for the next message addressed to `id`.
    ///
    /// # Errors
    ///
    /// - [`ChatError::InvalidInput`] if `id` is empty.
    /// - [`ChatError::UnknownParticipant`] if `id` has not joined.
    /// - [`ChatError::Departed`] if `id` left while waiting.
    /// - [`ChatError::TimedOut`] if nothing arrived in time.
    pub async fn receive(&self, id: &str, timeout: Duration) -> Result<ChatMessage, ChatError> {
        let id = ParticipantId::parse(id)?;
        let mailbox = self.registry.lookup(&id).await?;

        match mailbox.recv(timeout).await {
            Delivery::Message(message) => {
                tracing::debug!(participant = %id, "message received");
                Ok(message)
            }
            Delivery::Closed => {
                tracing::debug!(participant = %id, "receive ended by departure");
                Err(ChatError::Departed(id.into()))
            }
            Delivery::TimedOut => Err(ChatError::TimedOut),
        }
    }

    /// Returns the number of joined participants.
    pub async fn participant_count(&self) -> usize {
        self.registry.len().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    fn make_service(capacity: usize) -> ChatService {
        let registry = Arc::new(ParticipantRegistry::new(capacity));
        let (broadcaster, _handle) = Broadcaster::spawn(Arc::clone(&registry));
        ChatService::new(registry, broadcaster)
    }

    #[tokio::test]
    async fn join_rejects_empty_id() {
        let service = make_service(4);
        assert!(matches!(
            service.join("").await,
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn join_survives_oversized_mailbox_capacity() {
        let service = make_service(usize::MAX);
        assert!(service.join("alice").await.is_ok());
        assert!(service.send("alice", "hi").await.is_ok());

        let Ok(message) = service.receive("alice", WAIT).await else {
            panic!("alice should receive her own broadcast");
        };
        assert_eq!(message.as_str(), "alice: hi");
    }

    #[tokio::test]
    async fn send_requires_text() {
        let service = make_service(4);
        let _ = service.join("A").await;
        assert!(matches!(
            service.send("A", "").await,
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn send_from_unknown_participant_fails() {
        let service = make_service(4);
        assert_eq!(
            service.send("ghost", "hi").await.err(),
            Some(ChatError::UnknownParticipant("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn broadcast_reaches_everyone_including_sender() {
        let service = make_service(4);
        for id in ["A", "B", "C"] {
            assert!(service.join(id).await.is_ok());
        }

        assert!(service.send("A", "hi").await.is_ok());

        for id in ["B", "C", "A"] {
            let Ok(message) = service.receive(id, WAIT).await else {
                panic!("{id} should receive the broadcast");
            };
            assert_eq!(message.as_str(), "A: hi");
        }
    }

    #[tokio::test]
    async fn leave_then_operations_report_unknown() {
        let service = make_service(4);
        let _ = service.join("A").await;
        assert!(service.leave("A").await.is_ok());

        assert!(matches!(
            service.receive("A", WAIT).await,
            Err(ChatError::UnknownParticipant(_))
        ));
        assert!(matches!(
            service.send("A", "hi").await,
            Err(ChatError::UnknownParticipant(_))
        ));
    }

    #[tokio::test]
    async fn leave_unknown_is_ok() {
        let service = make_service(4);
        assert!(service.leave("nobody").await.is_ok());
        assert!(matches!(
            service.leave("").await,
            Err(ChatError::InvalidInput(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn receive_times_out_without_traffic() {
        let service = make_service(4);
        let _ = service.join("A").await;
        let started = tokio::time::Instant::now();

        let result = service.receive("A", Duration::from_secs(1)).await;

        assert_eq!(result.err(), Some(ChatError::TimedOut));
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn leave_unblocks_pending_receive_with_departed() {
        let service = make_service(4);
        let _ = service.join("X").await;

        let waiter = {
            let service = service.clone();
            tokio::spawn(async move { service.receive("X", Duration::from_secs(30)).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = service.leave("X").await;

        let Ok(Ok(result)) = tokio::time::timeout(WAIT, waiter).await else {
            panic!("pending receive did not unblock");
        };
        assert_eq!(result.err(), Some(ChatError::Departed("X".to_string())));
    }

    #[tokio::test]
    async fn sequential_sends_arrive_in_order() {
        let service = make_service(2);
        let _ = service.join("A").await;
        let _ = service.send("A", "m1").await;
        let _ = service.send("A", "m2").await;

        let first = service.receive("A", WAIT).await;
        let second = service.receive("A", WAIT).await;
        assert_eq!(first.ok().map(|m| m.to_string()), Some("A: m1".to_string()));
        assert_eq!(second.ok().map(|m| m.to_string()), Some("A: m2".to_string()));
    }

    #[tokio::test]
    async fn full_mailbox_does_not_block_sender_or_others() {
        let service = make_service(1);
        let _ = service.join("slow").await;
        let _ = service.join("fast").await;

        for text in ["m1", "m2", "m3"] {
            let sent = tokio::time::timeout(WAIT, service.send("fast", text)).await;
            assert!(matches!(sent, Ok(Ok(_))));
            let Ok(message) = service.receive("fast", WAIT).await else {
                panic!("fast participant should keep receiving");
            };
            assert_eq!(message.to_string(), format!("fast: {text}"));
        }

        let Ok(message) = service.receive("slow", WAIT).await else {
            panic!("slow participant keeps its first message");
        };
        assert_eq!(message.as_str(), "fast: m1");
    }

    #[tokio::test(start_paused = true)]
    async fn rejoin_orphans_old_mailbox() {
        let service = make_service(4);
        let _ = service.join("A").await;
        let Ok(id) = ParticipantId::parse("A") else {
            panic!("valid id");
        };
        let Ok(old) = service.registry().lookup(&id).await else {
            panic!("A should be registered");
        };

        assert!(service.join("A").await.is_ok());
        let _ = service.send("A", "after").await;

        let Ok(message) = service.receive("A", WAIT).await else {
            panic!("new mailbox should receive");
        };
        assert_eq!(message.as_str(), "A: after");
        assert_eq!(
            old.recv(Duration::from_millis(50)).await,
            Delivery::TimedOut
        );
    }
}

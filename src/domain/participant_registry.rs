//! Concurrent participant storage.
//!
//! [`ParticipantRegistry`] maps each joined [`ParticipantId`] to its
//! [`Mailbox`]. One exclusive lock guards the map. It is held only for
//! structural access and for the non-blocking fan-out pass, never while
//! waiting on a mailbox.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::{ChatMessage, Mailbox, ParticipantId};
use crate::error::ChatError;

/// Result of delivering one message to every registered mailbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Mailboxes that accepted the message.
    pub delivered: usize,
    /// Mailboxes that were full; the message was dropped for them.
    pub dropped: usize,
}

/// Central store for all joined participants.
///
/// # Invariants
///
/// - Every mailbox reachable from the map is open.
/// - A removed mailbox is closed and never re-inserted.
/// - Re-joining an id replaces its mailbox; the previous one is orphaned
///   and receives nothing further.
#[derive(Debug)]
pub struct ParticipantRegistry {
    mailboxes: Mutex<HashMap<ParticipantId, Arc<Mailbox>>>,
    mailbox_capacity: usize,
}

impl ParticipantRegistry {
    /// Creates an empty registry whose mailboxes hold up to
    /// `mailbox_capacity` pending messages.
    #[must_use]
    pub fn new(mailbox_capacity: usize) -> Self {
        Self {
            mailboxes: Mutex::new(HashMap::new()),
            mailbox_capacity,
        }
    }

    /// Registers a fresh open mailbox for `id`.
    ///
    /// Returns `true` if an existing entry was replaced.
    pub async fn add(&self, id: ParticipantId) -> bool {
        let mailbox = Arc::new(Mailbox::new(self.mailbox_capacity));
        let mut map = self.mailboxes.lock().await;
        map.insert(id, mailbox).is_some()
    }

    /// Removes `id` and closes its mailbox, waking any pending receive.
    ///
    /// Returns `true` if the participant was registered.
    pub async fn remove(&self, id: &ParticipantId) -> bool {
        let removed = self.mailboxes.lock().await.remove(id);
        match removed {
            Some(mailbox) => {
                mailbox.close();
                true
            }
            None => false,
        }
    }

    /// Returns the mailbox registered for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnknownParticipant`] if `id` is not registered.
    pub async fn lookup(&self, id: &ParticipantId) -> Result<Arc<Mailbox>, ChatError> {
        let map = self.mailboxes.lock().await;
        map.get(id)
            .map(Arc::clone)
            .ok_or_else(|| ChatError::UnknownParticipant(id.to_string()))
    }

    /// Offers `message` to every registered mailbox without waiting.
    ///
    /// Full mailboxes drop the message; nobody else is affected.
    pub async fn fan_out(&self, message: &ChatMessage) -> FanOutReport {
        let map = self.mailboxes.lock().await;
        let mut report = FanOutReport::default();
        for mailbox in map.values() {
            if mailbox.try_deliver(message) {
                report.delivered += 1;
            } else {
                report.dropped += 1;
            }
        }
        report
    }

    /// Returns the number of joined participants.
    pub async fn len(&self) -> usize {
        self.mailboxes.lock().await.len()
    }

    /// Returns `true` if nobody is joined.
    pub async fn is_empty(&self) -> bool {
        self.mailboxes.lock().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::Delivery;

    fn pid(raw: &str) -> ParticipantId {
        let Ok(id) = ParticipantId::parse(raw) else {
            panic!("valid id");
        };
        id
    }

    #[tokio::test]
    async fn add_and_lookup() {
        let registry = ParticipantRegistry::new(4);
        assert!(!registry.add(pid("alice")).await);

        let Ok(mailbox) = registry.lookup(&pid("alice")).await else {
            panic!("alice should be registered");
        };
        assert!(!mailbox.is_closed());
    }

    #[tokio::test]
    async fn lookup_nonexistent_returns_error() {
        let registry = ParticipantRegistry::new(4);
        let result = registry.lookup(&pid("ghost")).await;
        assert_eq!(
            result.err(),
            Some(ChatError::UnknownParticipant("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn remove_closes_mailbox() {
        let registry = ParticipantRegistry::new(4);
        registry.add(pid("alice")).await;
        let Ok(mailbox) = registry.lookup(&pid("alice")).await else {
            panic!("alice should be registered");
        };

        assert!(registry.remove(&pid("alice")).await);
        assert!(mailbox.is_closed());
        assert!(registry.lookup(&pid("alice")).await.is_err());
    }

    #[tokio::test]
    async fn remove_nonexistent_is_noop() {
        let registry = ParticipantRegistry::new(4);
        assert!(!registry.remove(&pid("ghost")).await);
    }

    #[tokio::test]
    async fn rejoin_orphans_previous_mailbox() {
        let registry = ParticipantRegistry::new(4);
        registry.add(pid("alice")).await;
        let Ok(old) = registry.lookup(&pid("alice")).await else {
            panic!("alice should be registered");
        };

        assert!(registry.add(pid("alice")).await);
        let Ok(new) = registry.lookup(&pid("alice")).await else {
            panic!("alice should be registered");
        };
        assert!(!Arc::ptr_eq(&old, &new));

        let report = registry
            .fan_out(&ChatMessage::compose(&pid("bob"), "hi"))
            .await;
        assert_eq!(report.delivered, 1);
        assert_eq!(old.pending(), 0);
        assert_eq!(new.pending(), 1);
    }

    #[tokio::test]
    async fn fan_out_reaches_every_mailbox() {
        let registry = ParticipantRegistry::new(4);
        for id in ["a", "b", "c"] {
            registry.add(pid(id)).await;
        }

        let msg = ChatMessage::compose(&pid("a"), "hi");
        let report = registry.fan_out(&msg).await;
        assert_eq!(report, FanOutReport { delivered: 3, dropped: 0 });

        for id in ["a", "b", "c"] {
            let Ok(mailbox) = registry.lookup(&pid(id)).await else {
                panic!("{id} should be registered");
            };
            let delivery = mailbox.recv(Duration::from_secs(1)).await;
            assert_eq!(delivery, Delivery::Message(msg.clone()));
        }
    }

    #[tokio::test]
    async fn fan_out_drops_only_for_full_mailbox() {
        let registry = ParticipantRegistry::new(1);
        registry.add(pid("slow")).await;
        registry.add(pid("fast")).await;

        let first = ChatMessage::compose(&pid("fast"), "m1");
        let _ = registry.fan_out(&first).await;
        let Ok(fast) = registry.lookup(&pid("fast")).await else {
            panic!("fast should be registered");
        };
        let _ = fast.recv(Duration::from_secs(1)).await;

        let second = ChatMessage::compose(&pid("fast"), "m2");
        let report = registry.fan_out(&second).await;
        assert_eq!(report, FanOutReport { delivered: 1, dropped: 1 });
        assert_eq!(
            fast.recv(Duration::from_secs(1)).await,
            Delivery::Message(second)
        );
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = ParticipantRegistry::new(4);
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);

        registry.add(pid("alice")).await;
        assert!(!registry.is_empty().await);
        assert_eq!(registry.len().await, 1);
    }
}

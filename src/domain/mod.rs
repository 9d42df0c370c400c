//! Domain layer: participant identity, mailboxes, registry, and the
//! broadcast stream.
//!
//! This module contains the concurrency core of the relay: the registry
//! of joined participants, the per-participant mailbox with its
//! open/closed state, and the single dispatch loop that fans every sent
//! message out to all mailboxes.

pub mod broadcaster;
pub mod chat_message;
pub mod mailbox;
pub mod participant_id;
pub mod participant_registry;

pub use broadcaster::Broadcaster;
pub use chat_message::ChatMessage;
pub use mailbox::{Delivery, Mailbox};
pub use participant_id::ParticipantId;
pub use participant_registry::{FanOutReport, ParticipantRegistry};

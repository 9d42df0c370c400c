//! Broadcast payload.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::ParticipantId;

/// A single message on the broadcast stream.
///
/// Immutable once composed. The text is shared behind an `Arc<str>` so
/// that fan-out to many mailboxes clones a pointer, not the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage(Arc<str>);

impl ChatMessage {
    /// Composes the wire text `"{sender}: {text}"`.
    #[must_use]
    pub fn compose(sender: &ParticipantId, text: &str) -> Self {
        Self(Arc::from(format!("{sender}: {text}")))
    }

    /// Returns the formatted message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ChatMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

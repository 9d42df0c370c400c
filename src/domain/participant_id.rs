//! Type-safe participant identifier.
//!
//! [`ParticipantId`] is a newtype wrapper around the caller-supplied
//! string so that participant identifiers cannot be confused with message
//! text or other free-form strings.

use std::fmt;

use serde::Serialize;

use crate::error::ChatError;

/// Identifier of a chat participant.
///
/// Opaque and caller-supplied. The only validation is that it is not
/// empty. Used as the dictionary key in [`super::ParticipantRegistry`] and
/// as the sender prefix of every [`super::ChatMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Parses a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidInput`] if `raw` is empty.
    pub fn parse(raw: &str) -> Result<Self, ChatError> {
        if raw.is_empty() {
            return Err(ChatError::InvalidInput(
                "participant id is required".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

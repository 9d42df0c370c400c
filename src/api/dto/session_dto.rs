//! Session endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ChatMessage, ParticipantId};

/// Query string accepted by every session endpoint.
///
/// Both fields are optional at the transport level; the service rejects
/// missing values with `InvalidInput`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Participant identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Message text (only read by `/send`).
    #[serde(default)]
    pub message: Option<String>,
}

impl SessionQuery {
    /// Returns the participant id, or `""` when absent.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Returns the message text, or `""` when absent.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Which session operation an [`AckResponse`] acknowledges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AckStatus {
    /// `/join` succeeded.
    Joined,
    /// `/send` enqueued the message.
    Sent,
    /// `/leave` succeeded.
    Left,
}

/// Acknowledgement for `/join`, `/send`, and `/leave`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    /// Operation acknowledged.
    pub status: AckStatus,
    /// Participant the operation applied to.
    #[schema(value_type = String)]
    pub participant_id: ParticipantId,
    /// Human-readable summary.
    pub detail: String,
}

impl AckResponse {
    /// Builds the acknowledgement for `status` on `participant_id`.
    #[must_use]
    pub fn new(status: AckStatus, participant_id: ParticipantId) -> Self {
        let detail = match status {
            AckStatus::Joined => format!("client {participant_id} joined the chat"),
            AckStatus::Sent => format!("message from {participant_id} sent"),
            AckStatus::Left => format!("client {participant_id} left the chat"),
        };
        Self {
            status,
            participant_id,
            detail,
        }
    }
}

/// Response body for a successful `/messages` long poll.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Delivered message, formatted as `"{sender}: {text}"`.
    #[schema(value_type = String)]
    pub message: ChatMessage,
}

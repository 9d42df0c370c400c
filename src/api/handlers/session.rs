//! Session handlers: join, send, leave, and the `/messages` long poll.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AckResponse, AckStatus, MessageResponse, SessionQuery};
use crate::app_state::AppState;
use crate::error::{ChatError, ErrorResponse};

/// `GET /join?id=` — Join the chat.
///
/// # Errors
///
/// Returns [`ChatError::InvalidInput`] when `id` is missing.
#[utoipa::path(
    get,
    path = "/join",
    tag = "Session",
    summary = "Join the chat",
    description = "Registers a participant with a fresh mailbox. Re-joining an id replaces its mailbox.",
    params(SessionQuery),
    responses(
        (status = 200, description = "Participant joined", body = AckResponse),
        (status = 400, description = "Missing participant id", body = ErrorResponse),
    )
)]
pub async fn join(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, ChatError> {
    let id = state.chat_service.join(query.id()).await?;
    Ok(Json(AckResponse::new(AckStatus::Joined, id)))
}

/// `GET /send?id=&message=` — Broadcast a message.
///
/// # Errors
///
/// Returns [`ChatError::InvalidInput`] when `id` or `message` is missing
/// and [`ChatError::UnknownParticipant`] when `id` has not joined.
#[utoipa::path(
    get,
    path = "/send",
    tag = "Session",
    summary = "Broadcast a message",
    description = "Enqueues `\"{id}: {message}\"` for delivery to every joined participant, the sender included. Delivery is best-effort.",
    params(SessionQuery),
    responses(
        (status = 200, description = "Message enqueued", body = AckResponse),
        (status = 400, description = "Missing participant id or message", body = ErrorResponse),
        (status = 404, description = "Unknown participant", body = ErrorResponse),
    )
)]
pub async fn send(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, ChatError> {
    let id = state
        .chat_service
        .send(query.id(), query.message())
        .await?;
    Ok(Json(AckResponse::new(AckStatus::Sent, id)))
}

/// `GET /leave?id=` — Leave the chat.
///
/// # Errors
///
/// Returns [`ChatError::InvalidInput`] when `id` is missing.
#[utoipa::path(
    get,
    path = "/leave",
    tag = "Session",
    summary = "Leave the chat",
    description = "Removes the participant and wakes any pending long poll with 410 Gone. Unknown ids are accepted.",
    params(SessionQuery),
    responses(
        (status = 200, description = "Participant left", body = AckResponse),
        (status = 400, description = "Missing participant id", body = ErrorResponse),
    )
)]
pub async fn leave(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, ChatError> {
    let id = state.chat_service.leave(query.id()).await?;
    Ok(Json(AckResponse::new(AckStatus::Left, id)))
}

/// `GET /messages?id=` — Long-poll for the next message.
///
/// # Errors
///
/// Returns [`ChatError::InvalidInput`], [`ChatError::UnknownParticipant`],
/// [`ChatError::Departed`], or [`ChatError::TimedOut`].
#[utoipa::path(
    get,
    path = "/messages",
    tag = "Session",
    summary = "Receive the next message",
    description = "Blocks until a message arrives, the participant leaves, or the poll timeout elapses.",
    params(SessionQuery),
    responses(
        (status = 200, description = "Message delivered", body = MessageResponse),
        (status = 400, description = "Missing participant id", body = ErrorResponse),
        (status = 404, description = "Unknown participant", body = ErrorResponse),
        (status = 410, description = "Participant left while waiting", body = ErrorResponse),
        (status = 504, description = "No message within the poll timeout", body = ErrorResponse),
    )
)]
pub async fn messages(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, ChatError> {
    let message = state
        .chat_service
        .receive(query.id(), state.poll_timeout)
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// Session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/join", get(join))
        .route("/send", get(send))
        .route("/leave", get(leave))
        .route("/messages", get(messages))
}

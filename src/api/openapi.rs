//! OpenAPI document for the relay's HTTP surface.

use utoipa::OpenApi;

use super::dto::{AckResponse, AckStatus, MessageResponse};
use super::handlers::{session, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Aggregated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "chat-relay",
        description = "Long-poll broadcast chat relay"
    ),
    paths(
        session::join,
        session::send,
        session::leave,
        session::messages,
        system::health_handler,
    ),
    components(schemas(
        AckResponse,
        AckStatus,
        MessageResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Session", description = "Join, send, leave, and long-poll receive"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Path the OpenAPI JSON document is served under.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

//! Data Transfer Objects for request/response serialization.

pub mod session_dto;

pub use session_dto::*;

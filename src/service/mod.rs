//! Service layer: session orchestration on top of the domain layer.

pub mod chat_service;

pub use chat_service::ChatService;

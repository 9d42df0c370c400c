//! # chat-relay
//!
//! Long-poll broadcast chat relay.
//!
//! Participants join with a caller-chosen id, send text that is broadcast
//! to every joined participant (the sender included), and retrieve
//! messages one at a time with a blocking long poll bounded by a timeout.
//! Delivery is best-effort: a participant whose mailbox is full misses
//! the message, and nobody else is slowed down by it.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP long poll)
//!     │
//!     ├── Session Handlers (api/)
//!     │
//!     ├── ChatService (service/)
//!     │
//!     ├── Broadcaster ──► dispatch loop (domain/)
//!     │                       │ fan-out, never waits
//!     └── ParticipantRegistry ┘
//!             └── Mailbox per participant
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

//! Shared types for the Taste Haven chat server
//!
//! Wire contract and domain models used by the server and any future
//! client crates: menu catalog types, order/reservation/conversation
//! entities, and the chat turn request/response DTOs.
//!
//! Enable the `db` feature to get `sqlx` row/column derives on the
//! persisted entities.

pub mod chat;
pub mod models;

// Re-exports
pub use chat::{IntentKind, TurnRequest, TurnResponse};
pub use models::{MenuCatalog, MenuItem, OrderLineItem};
pub use serde::{Deserialize, Serialize};

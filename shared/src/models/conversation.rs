//! Conversation history entities
//!
//! Append-only log: one record per processed turn, including intermediate
//! flow steps and invalid-input retries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of exchange a turn was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MessageType {
    Text,
    Order,
    Reservation,
    Recommendation,
}

/// Persisted conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ConversationTurn {
    pub id: i64,
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload.
#[derive(Debug, Clone)]
pub struct NewConversationTurn {
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub message_type: MessageType,
}

impl NewConversationTurn {
    pub fn new(
        session_id: impl Into<String>,
        user_message: impl Into<String>,
        bot_response: impl Into<String>,
        message_type: MessageType,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            message_type,
        }
    }
}

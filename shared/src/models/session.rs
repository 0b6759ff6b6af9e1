//! Session tracking (analytics only)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-session activity record, upserted on every turn. Purely for
/// operator analytics; never consulted by the flow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserSession {
    pub id: i64,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub total_messages: i64,
}

//! Conversation Repository
//!
//! Append-only turn log. Every processed chat turn writes exactly one row,
//! including invalid-input retries inside a flow.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use shared::models::{ConversationTurn, NewConversationTurn};

use super::{BaseRepository, RepoResult};

#[derive(Clone)]
pub struct ConversationRepository {
    base: BaseRepository,
}

impl ConversationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Append one turn and return its assigned id.
    pub async fn insert(conn: &mut SqliteConnection, turn: &NewConversationTurn) -> RepoResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO conversations
                (session_id, user_message, bot_response, message_type, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.session_id)
        .bind(&turn.user_message)
        .bind(&turn.bot_response)
        .bind(turn.message_type)
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Most recent `limit` turns for a session, newest first.
    ///
    /// Callers that build prompt context reverse the result so the dialogue
    /// reads oldest first.
    pub async fn recent(&self, session_id: &str, limit: i64) -> RepoResult<Vec<ConversationTurn>> {
        let turns = sqlx::query_as::<_, ConversationTurn>(
            r#"
            SELECT * FROM conversations
            WHERE session_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(self.base.pool())
        .await?;

        Ok(turns)
    }
}

//! Session Repository (analytics)

use chrono::Utc;
use sqlx::SqlitePool;

use shared::models::UserSession;

use super::{BaseRepository, RepoResult};

#[derive(Clone)]
pub struct SessionRepository {
    base: BaseRepository,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Record one message against a session, creating it on first contact.
    pub async fn touch(&self, session_id: &str, user_agent: Option<&str>) -> RepoResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO user_sessions
                (session_id, user_agent, started_at, last_activity, total_messages)
            VALUES (?, ?, ?, ?, 1)
            ON CONFLICT(session_id) DO UPDATE SET
                last_activity = excluded.last_activity,
                total_messages = user_sessions.total_messages + 1
            "#,
        )
        .bind(session_id)
        .bind(user_agent)
        .bind(now)
        .bind(now)
        .execute(self.base.pool())
        .await?;

        Ok(())
    }

    pub async fn find(&self, session_id: &str) -> RepoResult<Option<UserSession>> {
        let session =
            sqlx::query_as::<_, UserSession>("SELECT * FROM user_sessions WHERE session_id = ?")
                .bind(session_id)
                .fetch_optional(self.base.pool())
                .await?;

        Ok(session)
    }
}

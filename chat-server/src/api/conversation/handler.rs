//! Conversation History Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use shared::models::ConversationTurn;

use crate::core::ServerState;
use crate::db::repository::ConversationRepository;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Serialize)]
pub struct HistoryResponse {
    success: bool,
    session_id: String,
    messages: Vec<ConversationTurn>,
}

/// GET /api/conversation/:session_id - recent turns, oldest first.
/// `limit` outside [1, 100] falls back to the default of 10.
pub async fn history(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let limit = if (1..=100).contains(&query.limit) {
        query.limit
    } else {
        default_limit()
    };

    let repo = ConversationRepository::new(state.db.pool().clone());
    let mut messages = repo.recent(&session_id, limit).await?;
    messages.reverse();

    Ok(Json(HistoryResponse {
        success: true,
        session_id,
        messages,
    }))
}

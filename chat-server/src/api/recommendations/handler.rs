//! Recommendation API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_budget() -> String {
    "no limit".to_string()
}

fn default_session_id() -> String {
    "anonymous".to_string()
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// POST /api/recommendations - generation-backed menu suggestions
pub async fn recommend(
    State(state): State<ServerState>,
    Json(req): Json<RecommendationRequest>,
) -> AppResult<Response> {
    let preferences = req.preferences.trim();
    if preferences.is_empty() {
        return Err(AppError::validation("Preferences are required"));
    }

    match state
        .engine
        .recommendations(
            preferences,
            &req.dietary_restrictions,
            &req.budget,
            &req.session_id,
        )
        .await
    {
        Ok(text) => Ok(Json(RecommendationResponse {
            success: true,
            recommendations: Some(text),
            error: None,
        })
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, session_id = %req.session_id, "Recommendation error");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RecommendationResponse {
                    success: false,
                    recommendations: None,
                    error: Some("Failed to generate recommendations".to_string()),
                }),
            )
                .into_response())
        }
    }
}

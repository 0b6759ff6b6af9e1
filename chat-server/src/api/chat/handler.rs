//! Chat API Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use shared::chat::{TurnRequest, TurnResponse};

use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/chat - one conversational turn (intent detection + dispatch)
pub async fn chat(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<TurnRequest>,
) -> AppResult<Response> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let resp = state.engine.handle_turn(&req, user_agent).await?;
    Ok(turn_response(resp))
}

/// Direct flow-step request: the client drives one specific flow and
/// echoes the state it got back last turn.
#[derive(Debug, Deserialize)]
pub struct IntentStepRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub step: u8,
    #[serde(default)]
    pub collected_data: Option<serde_json::Value>,
}

fn default_session_id() -> String {
    "anonymous".to_string()
}

/// POST /api/chat/order-intent - one order-flow step
pub async fn order_intent(
    State(state): State<ServerState>,
    Json(req): Json<IntentStepRequest>,
) -> AppResult<Response> {
    let resp = state
        .engine
        .order_turn(&req.message, &req.session_id, req.step, req.collected_data)
        .await?;
    Ok(turn_response(resp))
}

/// POST /api/chat/reservation-intent - one reservation-flow step
pub async fn reservation_intent(
    State(state): State<ServerState>,
    Json(req): Json<IntentStepRequest>,
) -> AppResult<Response> {
    let resp = state
        .engine
        .reservation_turn(&req.message, &req.session_id, req.step, req.collected_data)
        .await?;
    Ok(turn_response(resp))
}

/// Generic failures keep the turn-response body but report 500.
fn turn_response(resp: TurnResponse) -> Response {
    let status = if resp.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(resp)).into_response()
}

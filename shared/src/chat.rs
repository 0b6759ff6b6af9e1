//! Chat turn wire types
//!
//! One `TurnRequest` per user message. The engine is stateless between
//! calls: when a multi-step flow is in progress the client must echo back
//! `step`, `collected_data` and `intent_type` from the previous
//! `TurnResponse`, and the engine resumes the flow from exactly that point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which multi-step flow a resumed turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Order,
    Reservation,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Order => "order",
            IntentKind::Reservation => "reservation",
        }
    }
}

/// Incoming chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    /// Raw user message (1..=1000 chars after trim)
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// Step cursor of an in-progress flow (echoed from the last response)
    #[serde(default)]
    pub step: Option<u8>,
    /// Partial record accumulated so far (echoed from the last response)
    #[serde(default)]
    pub collected_data: Option<serde_json::Value>,
    /// Required whenever `step` is present
    #[serde(default)]
    pub intent_type: Option<IntentKind>,
}

fn default_session_id() -> String {
    "anonymous".to_string()
}

/// Outgoing chat turn result.
///
/// Flow turns carry `step` + `collected_data` for the client to echo back;
/// plain conversational turns carry only the response text and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TurnResponse {
    /// Successful flow turn: response text plus the state to echo back.
    pub fn flow(
        response: impl Into<String>,
        step: u8,
        collected_data: serde_json::Value,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            step: Some(step),
            collected_data: Some(collected_data),
            session_id: Some(session_id.into()),
            timestamp: None,
            error: None,
        }
    }

    /// Successful conversational turn (no flow state).
    pub fn chat(
        response: impl Into<String>,
        session_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            step: None,
            collected_data: None,
            session_id: Some(session_id.into()),
            timestamp: Some(timestamp),
            error: None,
        }
    }

    /// Generic failure. Step and collected data are deliberately absent so
    /// the client retries with the state it already holds.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            step: None,
            collected_data: None,
            session_id: None,
            timestamp: None,
            error: Some(error.into()),
        }
    }
}

//! Turn dispatcher
//!
//! Routes each chat turn to the order flow, the reservation flow, or the
//! conversational fallback, and owns every persistence side effect: the
//! per-turn conversation log, the terminal-step record insert (one
//! transaction for both), and best-effort session tracking.
//!
//! Failure policy: invalid *input* re-prompts inside the flow; invalid
//! caller *state* (bad step, missing collected field, missing intent_type)
//! is a validation error; store or generator failures are logged with
//! their cause and surface only as a generic failure message.

use std::sync::Arc;

use chrono::{Local, Utc};
use serde_json::json;

use shared::chat::{IntentKind, TurnRequest, TurnResponse};
use shared::models::{MessageType, NewConversationTurn, NewOrder, NewReservation};

use super::order::{OrderDraft, OrderFlowState};
use super::reservation::{ReservationDraft, ReservationFlowState};
use super::{Intent, IntentDetector, ItemExtractor, StepOutcome, order, reservation};
use crate::db::DbService;
use crate::db::repository::{
    ConversationRepository, OrderRepository, RepoError, ReservationRepository, SessionRepository,
};
use crate::genai::{GenerationError, GenerationOptions, TextGenerator};
use crate::restaurant::Restaurant;
use crate::utils::validation::MAX_MESSAGE_LEN;
use crate::utils::{AppError, AppResult};

/// How many past turns feed the fallback prompt
const HISTORY_TURNS: i64 = 5;

const ORDER_FAILURE: &str = "Failed to process order";
const RESERVATION_FAILURE: &str = "Failed to process reservation";
const CHAT_FAILURE: &str = "Failed to process message";

/// Internal turn failure; callers see only generic text.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        EngineError::Repo(RepoError::from(e))
    }
}

pub struct ChatEngine {
    db: DbService,
    restaurant: Arc<Restaurant>,
    detector: IntentDetector,
    extractor: ItemExtractor,
    generator: Arc<dyn TextGenerator>,
    conversations: ConversationRepository,
    sessions: SessionRepository,
}

impl ChatEngine {
    pub fn new(
        db: DbService,
        restaurant: Arc<Restaurant>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let extractor = ItemExtractor::new(Arc::new(restaurant.menu.clone()));
        let conversations = ConversationRepository::new(db.pool().clone());
        let sessions = SessionRepository::new(db.pool().clone());
        Self {
            db,
            restaurant,
            detector: IntentDetector::default(),
            extractor,
            generator,
            conversations,
            sessions,
        }
    }

    /// Process one chat turn.
    ///
    /// 1. Explicit `step` → resume that flow (`intent_type` required).
    /// 2. Otherwise keyword detection starts a flow at step 0, order first.
    /// 3. Otherwise the conversational fallback answers.
    pub async fn handle_turn(
        &self,
        req: &TurnRequest,
        user_agent: Option<&str>,
    ) -> AppResult<TurnResponse> {
        let message = req.message.trim();
        if message.is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::validation(format!(
                "Message too long (max {MAX_MESSAGE_LEN} characters)"
            )));
        }

        // Session tracking is best-effort; a failure never blocks the turn
        if let Err(e) = self.sessions.touch(&req.session_id, user_agent).await {
            tracing::warn!(error = %e, session_id = %req.session_id, "Failed to track session");
        }

        if let Some(step) = req.step {
            let Some(kind) = req.intent_type else {
                return Err(AppError::validation(
                    "intent_type is required when resuming a flow step",
                ));
            };
            return match kind {
                IntentKind::Order => {
                    self.order_turn(message, &req.session_id, step, req.collected_data.clone())
                        .await
                }
                IntentKind::Reservation => {
                    self.reservation_turn(
                        message,
                        &req.session_id,
                        step,
                        req.collected_data.clone(),
                    )
                    .await
                }
            };
        }

        match self.detector.detect(message) {
            Some(Intent::Order) => self.order_turn(message, &req.session_id, 0, None).await,
            Some(Intent::Reservation) => {
                self.reservation_turn(message, &req.session_id, 0, None).await
            }
            None => match self.fallback(message, &req.session_id).await {
                Ok(resp) => Ok(resp),
                Err(e) => {
                    tracing::error!(error = %e, session_id = %req.session_id, "Chat error");
                    Ok(TurnResponse::failure(CHAT_FAILURE))
                }
            },
        }
    }

    // ── Order flow ──────────────────────────────────────────────────

    /// One step of the order flow. Also the backend of the direct
    /// `/api/chat/order-intent` endpoint.
    pub async fn order_turn(
        &self,
        message: &str,
        session_id: &str,
        step: u8,
        collected_data: Option<serde_json::Value>,
    ) -> AppResult<TurnResponse> {
        let message = message.trim();
        let draft: OrderDraft = parse_collected(collected_data)?;
        let state = OrderFlowState::resume(step, draft)
            .map_err(|e| AppError::validation(e.to_string()))?;

        match order::advance(state, message, &self.extractor, session_id) {
            StepOutcome::Continue { reply, state } => {
                let turn =
                    NewConversationTurn::new(session_id, message, reply.as_str(), MessageType::Order);
                match self.append_turn(&turn).await {
                    Ok(()) => Ok(flow_response(
                        reply,
                        state.step(),
                        serde_json::to_value(state.to_draft()),
                        session_id,
                        ORDER_FAILURE,
                    )),
                    Err(e) => {
                        tracing::error!(error = %e, session_id, "Order intent error");
                        Ok(TurnResponse::failure(ORDER_FAILURE))
                    }
                }
            }
            StepOutcome::Finalize(new_order) => {
                match self.persist_order(&new_order, message, session_id).await {
                    Ok(resp) => Ok(resp),
                    Err(e) => {
                        tracing::error!(error = %e, session_id, "Order intent error");
                        Ok(TurnResponse::failure(ORDER_FAILURE))
                    }
                }
            }
        }
    }

    /// Insert the order and its confirmation log entry in one transaction,
    /// then reset the flow to step 0 with empty collected data.
    async fn persist_order(
        &self,
        new_order: &NewOrder,
        message: &str,
        session_id: &str,
    ) -> Result<TurnResponse, EngineError> {
        let mut tx = self.db.pool().begin().await?;
        let order_id = OrderRepository::insert(&mut tx, new_order).await?;
        let reply = order::confirmation(order_id, new_order.total_price);
        let turn = NewConversationTurn::new(session_id, message, reply.as_str(), MessageType::Order);
        ConversationRepository::insert(&mut tx, &turn).await?;
        tx.commit().await?;

        tracing::info!(order_id, total_price = new_order.total_price, "Order confirmed");
        Ok(TurnResponse::flow(reply, 0, json!({}), session_id))
    }

    // ── Reservation flow ────────────────────────────────────────────

    /// One step of the reservation flow. Also the backend of the direct
    /// `/api/chat/reservation-intent` endpoint.
    pub async fn reservation_turn(
        &self,
        message: &str,
        session_id: &str,
        step: u8,
        collected_data: Option<serde_json::Value>,
    ) -> AppResult<TurnResponse> {
        let message = message.trim();
        let draft: ReservationDraft = parse_collected(collected_data)?;
        let state = ReservationFlowState::resume(step, draft)
            .map_err(|e| AppError::validation(e.to_string()))?;
        let today = Local::now().date_naive();

        match reservation::advance(state, message, today) {
            StepOutcome::Continue { reply, state } => {
                let turn =
                    NewConversationTurn::new(session_id, message, reply.as_str(), MessageType::Reservation);
                match self.append_turn(&turn).await {
                    Ok(()) => Ok(flow_response(
                        reply,
                        state.step(),
                        serde_json::to_value(state.to_draft()),
                        session_id,
                        RESERVATION_FAILURE,
                    )),
                    Err(e) => {
                        tracing::error!(error = %e, session_id, "Reservation intent error");
                        Ok(TurnResponse::failure(RESERVATION_FAILURE))
                    }
                }
            }
            StepOutcome::Finalize(new_reservation) => {
                match self
                    .persist_reservation(&new_reservation, message, session_id)
                    .await
                {
                    Ok(resp) => Ok(resp),
                    Err(e) => {
                        tracing::error!(error = %e, session_id, "Reservation intent error");
                        Ok(TurnResponse::failure(RESERVATION_FAILURE))
                    }
                }
            }
        }
    }

    async fn persist_reservation(
        &self,
        new_reservation: &NewReservation,
        message: &str,
        session_id: &str,
    ) -> Result<TurnResponse, EngineError> {
        let mut tx = self.db.pool().begin().await?;
        let reservation_id = ReservationRepository::insert(&mut tx, new_reservation).await?;
        let reply = reservation::confirmation(
            reservation_id,
            new_reservation.party_size,
            new_reservation.reservation_date,
            &new_reservation.reservation_time,
        );
        let turn = NewConversationTurn::new(session_id, message, reply.as_str(), MessageType::Reservation);
        ConversationRepository::insert(&mut tx, &turn).await?;
        tx.commit().await?;

        tracing::info!(
            reservation_id,
            party_size = new_reservation.party_size,
            "Reservation confirmed"
        );
        Ok(TurnResponse::flow(reply, 0, json!({}), session_id))
    }

    // ── Conversational fallback ─────────────────────────────────────

    async fn fallback(&self, message: &str, session_id: &str) -> Result<TurnResponse, EngineError> {
        let history = self.conversations.recent(session_id, HISTORY_TURNS).await?;

        let mut prompt = self.restaurant.system_prompt.clone();
        prompt.push('\n');
        if !history.is_empty() {
            prompt.push_str("\nPrevious conversation context:\n");
            // Replay oldest first so the dialogue reads top-down
            let context = history
                .iter()
                .rev()
                .map(|t| format!("User: {}\nAssistant: {}", t.user_message, t.bot_response))
                .collect::<Vec<_>>()
                .join("\n");
            prompt.push_str(&context);
            prompt.push('\n');
        }
        prompt.push_str(&format!("\nUser: {message}"));

        let text = self
            .generator
            .generate(&prompt, &GenerationOptions::chat())
            .await?;

        let turn = NewConversationTurn::new(session_id, message, text.as_str(), MessageType::Text);
        self.append_turn(&turn).await?;

        Ok(TurnResponse::chat(text, session_id, Utc::now()))
    }

    // ── Recommendations ─────────────────────────────────────────────

    /// Generation-backed menu recommendations, persisted to the
    /// conversation log as `message_type=recommendation`.
    pub async fn recommendations(
        &self,
        preferences: &str,
        dietary_restrictions: &[String],
        budget: &str,
        session_id: &str,
    ) -> Result<String, EngineError> {
        let restrictions_text = if dietary_restrictions.is_empty() {
            "None".to_string()
        } else {
            dietary_restrictions.join(", ")
        };

        let prompt = format!(
            "{}\n\nBased on a customer's preferences and restrictions, recommend 3 dishes from \
             our menu.\n\nCustomer Preferences: {preferences}\nDietary Restrictions: \
             {restrictions_text}\nBudget: {budget}\n\nProvide your recommendations with brief \
             reasons why they match the customer's preferences. Be warm and encouraging.",
            self.restaurant.system_prompt
        );

        let text = self
            .generator
            .generate(&prompt, &GenerationOptions::recommendations())
            .await?;

        let turn = NewConversationTurn::new(
            session_id,
            format!("Preferences: {preferences}, Restrictions: {restrictions_text}"),
            text.as_str(),
            MessageType::Recommendation,
        );
        self.append_turn(&turn).await?;

        Ok(text)
    }

    // ── Helpers ─────────────────────────────────────────────────────

    /// Append one conversation turn outside any transaction.
    async fn append_turn(&self, turn: &NewConversationTurn) -> Result<(), EngineError> {
        let mut conn = self.db.pool().acquire().await?;
        ConversationRepository::insert(&mut conn, turn).await?;
        Ok(())
    }
}

/// Deserialize caller-echoed `collected_data`, treating malformed payloads
/// as a caller error rather than a server fault.
fn parse_collected<T: Default + serde::de::DeserializeOwned>(
    collected_data: Option<serde_json::Value>,
) -> AppResult<T> {
    match collected_data {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| AppError::validation(format!("Invalid collected_data: {e}"))),
    }
}

/// Build the flow response, downgrading a draft-serialization failure to
/// the flow's generic error.
fn flow_response(
    reply: String,
    step: u8,
    draft: Result<serde_json::Value, serde_json::Error>,
    session_id: &str,
    failure: &str,
) -> TurnResponse {
    match draft {
        Ok(collected) => TurnResponse::flow(reply, step, collected, session_id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize collected_data");
            TurnResponse::failure(failure)
        }
    }
}

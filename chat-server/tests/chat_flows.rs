//! End-to-end engine tests: full order and reservation dialogues against
//! an in-memory database, with a scripted text generator standing in for
//! the external service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Days, Local};

use chat_server::db::repository::{
    ConversationRepository, OrderRepository, ReservationRepository, SessionRepository,
};
use chat_server::genai::{GenerationError, GenerationOptions, TextGenerator};
use chat_server::{AppError, ChatEngine, DbService, Restaurant};
use shared::chat::{IntentKind, TurnRequest, TurnResponse};
use shared::models::{MessageType, OrderStatus};

// ── Test doubles ────────────────────────────────────────────────────

/// Scripted generator: pops canned replies and records every prompt.
struct MockGenerator {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Welcome to Taste Haven! 😊".to_string()))
    }
}

/// Generator that always fails.
struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Empty)
    }
}

// ── Harness ─────────────────────────────────────────────────────────

async fn harness(generator: Arc<dyn TextGenerator>) -> (ChatEngine, DbService) {
    let db = DbService::open_in_memory().await.expect("in-memory db");
    let restaurant = Arc::new(Restaurant::taste_haven());
    let engine = ChatEngine::new(db.clone(), restaurant, generator);
    (engine, db)
}

fn turn(message: &str) -> TurnRequest {
    TurnRequest {
        message: message.to_string(),
        session_id: "s1".to_string(),
        step: None,
        collected_data: None,
        intent_type: None,
    }
}

fn resume(message: &str, kind: IntentKind, previous: &TurnResponse) -> TurnRequest {
    TurnRequest {
        message: message.to_string(),
        session_id: "s1".to_string(),
        step: previous.step,
        collected_data: previous.collected_data.clone(),
        intent_type: Some(kind),
    }
}

async fn send(engine: &ChatEngine, req: TurnRequest) -> TurnResponse {
    engine.handle_turn(&req, Some("test-agent")).await.expect("turn ok")
}

// ── Order flow ──────────────────────────────────────────────────────

#[tokio::test]
async fn order_flow_end_to_end() {
    let (engine, db) = harness(MockGenerator::new(&[])).await;

    // Step 0: extraction (scenario A)
    let r = send(&engine, turn("I want Spring Rolls")).await;
    assert!(r.success);
    assert_eq!(r.step, Some(1));
    let items = &r.collected_data.as_ref().unwrap()["items"];
    assert_eq!(items[0]["id"], "app_1");
    assert_eq!(items[0]["name"], "Spring Rolls");
    assert_eq!(items[0]["price"], 8.99);
    assert_eq!(items[0]["quantity"], 1);
    assert!(r.response.as_ref().unwrap().contains("Spring Rolls"));

    // Step 1: name
    let r = send(&engine, resume("Anna Ng", IntentKind::Order, &r)).await;
    assert_eq!(r.step, Some(2));

    // Step 2: bad email re-prompts without advancing
    let bad = send(&engine, resume("not-an-email", IntentKind::Order, &r)).await;
    assert_eq!(bad.step, Some(2));
    assert!(bad.response.as_ref().unwrap().contains("valid email"));

    let r = send(&engine, resume("anna@example.com", IntentKind::Order, &bad)).await;
    assert_eq!(r.step, Some(3));

    // Step 3: phone, then summary
    let r = send(&engine, resume("(555) 123-4567", IntentKind::Order, &r)).await;
    assert_eq!(r.step, Some(4));
    let summary = r.response.clone().unwrap();
    assert!(summary.contains("1x Spring Rolls"));
    assert!(summary.contains("Total: $8.99"));

    // Step 4: "no" finalizes with empty special requests (scenario D)
    let r = send(&engine, resume("no", IntentKind::Order, &r)).await;
    assert!(r.success);
    assert_eq!(r.step, Some(0));
    assert_eq!(r.collected_data, Some(serde_json::json!({})));
    let confirmation = r.response.unwrap();
    assert!(confirmation.contains("Order #1 Confirmed!"));
    assert!(confirmation.contains("Total: $8.99"));

    // Stored record honors the invariants
    let order = OrderRepository::new(db.pool().clone())
        .find_by_id(1)
        .await
        .unwrap()
        .expect("order persisted");
    assert_eq!(order.customer_name, "Anna Ng");
    assert_eq!(order.customer_email.as_deref(), Some("anna@example.com"));
    assert_eq!(order.special_requests, "");
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.total_price, 8.99);
    assert_eq!(order.session_id, "s1");

    // One conversation row per turn, all typed "order"
    let turns = ConversationRepository::new(db.pool().clone())
        .recent("s1", 50)
        .await
        .unwrap();
    assert_eq!(turns.len(), 6);
    assert!(turns.iter().all(|t| t.message_type == MessageType::Order));
}

#[tokio::test]
async fn order_flow_restarts_after_terminal_step() {
    let (engine, db) = harness(MockGenerator::new(&[])).await;

    for expected_id in 1..=2 {
        let mut r = send(&engine, turn("give me a Tiramisu")).await;
        for answer in ["Ben", "ben@example.com", "5551234567", "none"] {
            r = send(&engine, resume(answer, IntentKind::Order, &r)).await;
        }
        assert_eq!(r.step, Some(0));
        assert!(r.response.unwrap().contains(&format!("Order #{expected_id}")));
    }

    assert!(
        OrderRepository::new(db.pool().clone())
            .find_by_id(2)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn order_start_without_menu_items_stays_at_step_zero() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    let r = send(&engine, turn("I want to order something nice")).await;
    assert!(r.success);
    assert_eq!(r.step, Some(0));
    assert!(r.response.unwrap().contains("didn't find any menu items"));
}

// ── Reservation flow ────────────────────────────────────────────────

#[tokio::test]
async fn reservation_flow_end_to_end() {
    let (engine, db) = harness(MockGenerator::new(&[])).await;
    let date = (Local::now().date_naive() + Days::new(7)).to_string();

    let r = send(&engine, turn("I'd like to book a table")).await;
    assert_eq!(r.step, Some(1));

    let r = send(&engine, resume("Maria Ponte", IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(2));

    let r = send(&engine, resume("maria@example.com", IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(3));

    // Scenario B: party size out of range stays at step 3
    let too_many = send(&engine, resume("25", IntentKind::Reservation, &r)).await;
    assert_eq!(too_many.step, Some(3));
    assert!(
        too_many
            .response
            .unwrap()
            .contains("Party size must be between 1 and 20")
    );

    let r = send(&engine, resume("4", IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(4));

    let r = send(&engine, resume(&date, IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(5));

    // Scenario C: valid time advances with the full summary
    let r = send(&engine, resume("19:30", IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(6));
    let summary = r.response.clone().unwrap();
    assert!(summary.contains("Name: Maria Ponte"));
    assert!(summary.contains("Party size: 4"));
    assert!(summary.contains(&format!("Date: {date}")));
    assert!(summary.contains("Time: 19:30"));

    let r = send(&engine, resume("window seat please", IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(0));
    assert_eq!(r.collected_data, Some(serde_json::json!({})));
    assert!(r.response.unwrap().contains("Reservation #1 Confirmed!"));

    let reservation = ReservationRepository::new(db.pool().clone())
        .find_by_id(1)
        .await
        .unwrap()
        .expect("reservation persisted");
    assert_eq!(reservation.customer_name, "Maria Ponte");
    assert_eq!(reservation.party_size, 4);
    assert_eq!(reservation.reservation_time, "19:30");
    assert_eq!(reservation.special_requests, "window seat please");
    assert_eq!(reservation.reservation_date.to_string(), date);

    let turns = ConversationRepository::new(db.pool().clone())
        .recent("s1", 50)
        .await
        .unwrap();
    assert!(turns.iter().all(|t| t.message_type == MessageType::Reservation));
}

#[tokio::test]
async fn reservation_rejects_past_dates_and_bad_times() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    let mut r = send(&engine, turn("table for tonight please")).await;
    for answer in ["Maria", "maria@example.com", "5551234567", "2"] {
        r = send(&engine, resume(answer, IntentKind::Reservation, &r)).await;
    }
    assert_eq!(r.step, Some(4));

    let past = send(&engine, resume("2020-01-01", IntentKind::Reservation, &r)).await;
    assert_eq!(past.step, Some(4));
    assert!(past.response.unwrap().contains("must be in the future"));

    let tomorrow = (Local::now().date_naive() + Days::new(1)).to_string();
    let r = send(&engine, resume(&tomorrow, IntentKind::Reservation, &r)).await;
    assert_eq!(r.step, Some(5));

    let bad_time = send(&engine, resume("late evening", IntentKind::Reservation, &r)).await;
    assert_eq!(bad_time.step, Some(5));
    assert!(bad_time.response.unwrap().contains("HH:MM"));
}

// ── Dispatch ────────────────────────────────────────────────────────

#[tokio::test]
async fn order_keywords_win_over_reservation_keywords() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    // Both keyword sets match; the order flow answers (and finds no items)
    let r = send(&engine, turn("I want to book a table and order wine")).await;
    assert_eq!(r.step, Some(0));
    assert!(r.response.unwrap().contains("didn't find any menu items"));
}

#[tokio::test]
async fn resuming_a_step_requires_intent_type() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    let req = TurnRequest {
        message: "Anna".to_string(),
        session_id: "s1".to_string(),
        step: Some(1),
        collected_data: None,
        intent_type: None,
    };
    let err = engine.handle_turn(&req, None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn malformed_flow_state_is_a_validation_error() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    // Step 2 without the fields collected at steps 0-1
    let err = engine
        .order_turn("anna@example.com", "s1", 2, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = engine
        .reservation_turn("hi", "s1", 9, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn empty_and_oversized_messages_are_rejected() {
    let (engine, _db) = harness(MockGenerator::new(&[])).await;

    let err = engine.handle_turn(&turn("   "), None).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = engine
        .handle_turn(&turn(&"x".repeat(1001)), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

// ── Conversational fallback ─────────────────────────────────────────

#[tokio::test]
async fn fallback_feeds_history_into_the_prompt() {
    let generator = MockGenerator::new(&["We're open until 10pm!", "You're welcome! 😊"]);
    let (engine, db) = harness(generator.clone()).await;

    let r = send(&engine, turn("what are your hours?")).await;
    assert!(r.success);
    assert_eq!(r.response.as_deref(), Some("We're open until 10pm!"));
    assert!(r.step.is_none());
    assert!(r.timestamp.is_some());

    let r = send(&engine, turn("thanks!")).await;
    assert_eq!(r.response.as_deref(), Some("You're welcome! 😊"));

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    // First turn: no history block yet
    assert!(!prompts[0].contains("Previous conversation context:"));
    assert!(prompts[0].contains("You are a professional AI assistant for Taste Haven"));
    assert!(prompts[0].ends_with("User: what are your hours?"));
    // Second turn replays the first exchange, oldest first
    assert!(prompts[1].contains("Previous conversation context:"));
    assert!(prompts[1].contains("User: what are your hours?\nAssistant: We're open until 10pm!"));
    assert!(prompts[1].ends_with("User: thanks!"));

    let turns = ConversationRepository::new(db.pool().clone())
        .recent("s1", 10)
        .await
        .unwrap();
    assert_eq!(turns.len(), 2);
    assert!(turns.iter().all(|t| t.message_type == MessageType::Text));
}

#[tokio::test]
async fn generation_failure_surfaces_generic_error_and_logs_nothing() {
    let (engine, db) = harness(Arc::new(FailingGenerator)).await;

    let r = send(&engine, turn("tell me about the chef")).await;
    assert!(!r.success);
    assert_eq!(r.error.as_deref(), Some("Failed to process message"));
    assert!(r.step.is_none());
    assert!(r.collected_data.is_none());

    // No partial conversation log
    let turns = ConversationRepository::new(db.pool().clone())
        .recent("s1", 10)
        .await
        .unwrap();
    assert!(turns.is_empty());
}

// ── Session tracking ────────────────────────────────────────────────

#[tokio::test]
async fn sessions_accumulate_message_counts() {
    let (engine, db) = harness(MockGenerator::new(&[])).await;

    send(&engine, turn("hello there")).await;
    send(&engine, turn("what's vegan?")).await;
    send(&engine, turn("I want Spring Rolls")).await;

    let session = SessionRepository::new(db.pool().clone())
        .find("s1")
        .await
        .unwrap()
        .expect("session tracked");
    assert_eq!(session.total_messages, 3);
    assert_eq!(session.user_agent.as_deref(), Some("test-agent"));
}

// ── Recommendations ─────────────────────────────────────────────────

#[tokio::test]
async fn recommendations_persist_a_recommendation_turn() {
    let generator = MockGenerator::new(&["Try the Vegetable Risotto!"]);
    let (engine, db) = harness(generator.clone()).await;

    let text = engine
        .recommendations("something creamy", &["vegetarian".to_string()], "under $20", "s1")
        .await
        .expect("recommendations");
    assert_eq!(text, "Try the Vegetable Risotto!");

    let prompts = generator.prompts();
    assert!(prompts[0].contains("Customer Preferences: something creamy"));
    assert!(prompts[0].contains("Dietary Restrictions: vegetarian"));
    assert!(prompts[0].contains("Budget: under $20"));

    let turns = ConversationRepository::new(db.pool().clone())
        .recent("s1", 10)
        .await
        .unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].message_type, MessageType::Recommendation);
    assert!(turns[0].user_message.contains("Preferences: something creamy"));
}

//! Chat API 模块
//!
//! `/api/chat` 是主入口：自动识别意图并分发。两个 intent 端点允许前端
//! 直接驱动某个多步流程。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/chat", post(handler::chat))
        .route("/api/chat/order-intent", post(handler::order_intent))
        .route("/api/chat/reservation-intent", post(handler::reservation_intent))
}

//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/orders/confirm", post(handler::confirm_from_chat))
        .route("/api/orders/{id}", get(handler::get_by_id))
}

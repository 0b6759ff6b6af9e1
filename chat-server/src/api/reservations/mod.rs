//! Reservation API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reservations", post(handler::create))
        .route("/api/reservations/{id}", get(handler::get_by_id))
}

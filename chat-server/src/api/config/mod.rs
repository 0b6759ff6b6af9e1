//! Restaurant info route

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use shared::models::RestaurantInfo;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/config", get(get_config))
}

#[derive(Serialize)]
pub struct ConfigResponse {
    restaurant: RestaurantInfo,
}

/// GET /api/config - restaurant name, contact details and hours
async fn get_config(State(state): State<ServerState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        restaurant: state.restaurant.info.clone(),
    })
}

//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use shared::models::{MenuCatalog, MenuItem};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
pub struct MenuResponse {
    success: bool,
    menu: MenuCatalog,
}

/// GET /api/menu - the full categorized menu
pub async fn list(State(state): State<ServerState>) -> Json<MenuResponse> {
    Json(MenuResponse {
        success: true,
        menu: state.restaurant.menu.clone(),
    })
}

#[derive(Serialize)]
pub struct CategoryResponse {
    success: bool,
    category: String,
    items: Vec<MenuItem>,
}

/// GET /api/menu/:category - one category by wire name
pub async fn get_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<CategoryResponse>> {
    let items = state
        .restaurant
        .menu
        .category(&category)
        .ok_or_else(|| AppError::not_found(format!("Category \"{category}\" not found")))?;

    Ok(Json(CategoryResponse {
        success: true,
        category,
        items: items.to_vec(),
    }))
}

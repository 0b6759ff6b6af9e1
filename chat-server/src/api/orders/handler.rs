//! Order API Handlers
//!
//! Direct order creation outside the chat flow. The same invariants hold:
//! at least one line item and a positive total, with the order and its
//! conversation-log entry committed in one transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use shared::models::{MessageType, NewConversationTurn, NewOrder, Order, OrderLineItem, OrderStatus};

use crate::core::ServerState;
use crate::db::repository::{ConversationRepository, OrderRepository};
use crate::flows::order as order_flow;
use crate::money;
use crate::utils::validation::{validate_email, validate_phone};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub items: Vec<OrderLineItem>,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_session_id() -> String {
    "anonymous".to_string()
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    success: bool,
    order_id: i64,
    total_price: f64,
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmation_message: Option<String>,
}

/// POST /api/orders - create an order; email and phone are optional but
/// validated when present
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let customer_name = req.customer_name.trim();
    let customer_email = req.customer_email.trim();
    let customer_phone = req.customer_phone.trim();

    if customer_name.is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    if req.items.is_empty() {
        return Err(AppError::validation("Items must be a non-empty list"));
    }
    if !customer_email.is_empty() && !validate_email(customer_email) {
        return Err(AppError::validation("Invalid email format"));
    }
    if !customer_phone.is_empty() && !validate_phone(customer_phone) {
        return Err(AppError::validation("Invalid phone format"));
    }

    let total = money::order_total(&req.items);
    let total_price = money::to_f64(total);
    if total_price <= 0.0 {
        return Err(AppError::validation("Order total must be greater than 0"));
    }

    let new_order = NewOrder {
        customer_name: customer_name.to_string(),
        customer_email: some_if_present(customer_email),
        customer_phone: some_if_present(customer_phone),
        items: req.items.clone(),
        special_requests: req.special_requests.trim().to_string(),
        total_price,
        status: OrderStatus::Confirmed,
        session_id: req.session_id.clone(),
    };

    let names: Vec<&str> = req.items.iter().map(|i| i.name.as_str()).collect();
    let order_id = insert_with_log(
        &state,
        &new_order,
        format!("Placed order for {}", names.join(", ")),
        |order_id| format!("Order #{order_id} confirmed! Total: ${total_price:.2}"),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            order_id,
            total_price,
            status: "confirmed",
            message: format!("Order #{order_id} created successfully!"),
            confirmation_message: None,
        }),
    ))
}

/// POST /api/orders/confirm - chat-confirmed order; all contact fields
/// required
pub async fn confirm_from_chat(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let customer_name = req.customer_name.trim();
    let customer_email = req.customer_email.trim();
    let customer_phone = req.customer_phone.trim();

    if customer_name.is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    if customer_email.is_empty() {
        return Err(AppError::validation("Customer email is required"));
    }
    if customer_phone.is_empty() {
        return Err(AppError::validation("Customer phone is required"));
    }
    if !validate_email(customer_email) {
        return Err(AppError::validation("Invalid email format"));
    }
    if !validate_phone(customer_phone) {
        return Err(AppError::validation("Invalid phone format"));
    }
    if req.items.is_empty() {
        return Err(AppError::validation("Items must be a non-empty list"));
    }

    let total = money::order_total(&req.items);
    let total_price = money::to_f64(total);
    if total_price <= 0.0 {
        return Err(AppError::validation("Order total must be greater than 0"));
    }

    let new_order = NewOrder {
        customer_name: customer_name.to_string(),
        customer_email: Some(customer_email.to_string()),
        customer_phone: Some(customer_phone.to_string()),
        items: req.items.clone(),
        special_requests: req.special_requests.trim().to_string(),
        total_price,
        status: OrderStatus::Confirmed,
        session_id: req.session_id.clone(),
    };

    let items_str = req
        .items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ");
    let order_id = insert_with_log(
        &state,
        &new_order,
        format!("Order confirmed: {items_str}"),
        |order_id| {
            format!(
                "Order #{order_id} has been successfully placed! Your order total is \
                 ${total_price:.2}. We'll prepare it right away!"
            )
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            order_id,
            total_price,
            status: "confirmed",
            message: format!("Order #{order_id} confirmed!"),
            confirmation_message: Some(order_flow::confirmation(order_id, total_price)),
        }),
    ))
}

#[derive(Serialize)]
pub struct OrderResponse {
    success: bool,
    order: Order,
}

/// GET /api/orders/:id - order detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.db.pool().clone());
    let order = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

fn some_if_present(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Insert the order and its log entry in one transaction; the log's bot
/// response needs the assigned id, hence the closure.
async fn insert_with_log(
    state: &ServerState,
    new_order: &NewOrder,
    user_message: String,
    bot_response: impl FnOnce(i64) -> String,
) -> AppResult<i64> {
    let mut tx = state
        .db
        .pool()
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let order_id = OrderRepository::insert(&mut tx, new_order).await?;
    let turn = NewConversationTurn::new(
        new_order.session_id.as_str(),
        user_message,
        bot_response(order_id),
        MessageType::Order,
    );
    ConversationRepository::insert(&mut tx, &turn).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(order_id, total_price = new_order.total_price, "Order created via API");
    Ok(order_id)
}

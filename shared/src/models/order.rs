//! Order entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status. The chat flow always creates orders as
/// `confirmed`; the later stages are driven by kitchen tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
}

/// A snapshot copy of a menu item attached to an order. Immutable once
/// attached, even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Persisted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub items: Vec<OrderLineItem>,
    /// Empty string when the customer declined
    pub special_requests: String,
    pub total_price: f64,
    pub status: OrderStatus,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. `total_price` must already equal the line-item sum and
/// be positive; repositories do not recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderLineItem>,
    pub special_requests: String,
    pub total_price: f64,
    pub status: OrderStatus,
    pub session_id: String,
}

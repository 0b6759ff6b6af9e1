//! Order Repository
//!
//! Orders are created once (from the chat flow or the direct API) and read
//! back for status display. Line items are stored as a JSON snapshot so
//! later catalog edits never rewrite an existing order.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use shared::models::{NewOrder, Order, OrderLineItem, OrderStatus};

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

/// Raw row; `items` is the JSON column
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    items: String,
    special_requests: String,
    total_price: f64,
    status: OrderStatus,
    session_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> RepoResult<Order> {
        let items: Vec<OrderLineItem> = serde_json::from_str(&self.items)
            .map_err(|e| RepoError::Database(format!("Corrupt items column: {e}")))?;
        Ok(Order {
            id: self.id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            items,
            special_requests: self.special_requests,
            total_price: self.total_price,
            status: self.status,
            session_id: self.session_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Insert a new order and return its assigned id.
    ///
    /// Takes a connection so the caller can commit the order together with
    /// its conversation-log entry in one transaction.
    pub async fn insert(conn: &mut SqliteConnection, order: &NewOrder) -> RepoResult<i64> {
        if order.items.is_empty() {
            return Err(RepoError::Validation("Order has no items".to_string()));
        }
        if order.total_price <= 0.0 {
            return Err(RepoError::Validation(
                "Order total must be greater than 0".to_string(),
            ));
        }

        let items_json = serde_json::to_string(&order.items)
            .map_err(|e| RepoError::Database(format!("Failed to encode items: {e}")))?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO orders
                (customer_name, customer_email, customer_phone, items,
                 special_requests, total_price, status, session_id,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(&order.customer_phone)
        .bind(&items_json)
        .bind(&order.special_requests)
        .bind(order.total_price)
        .bind(order.status)
        .bind(&order.session_id)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;

        row.map(OrderRow::into_order).transpose()
    }
}

//! Reservation entities

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// Persisted table reservation.
///
/// `reservation_time` is a 24-hour `HH:MM` string; the flow validates the
/// shape and range before it ever reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub party_size: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    /// Empty string when the customer declined
    pub special_requests: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. `party_size` must be in [1, 20] and the date must not
/// be in the past; callers validate before insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub party_size: i32,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    pub special_requests: String,
    pub status: ReservationStatus,
}

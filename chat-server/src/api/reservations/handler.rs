//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use shared::models::{NewReservation, Reservation, ReservationStatus};

use crate::core::ServerState;
use crate::db::repository::ReservationRepository;
use crate::utils::validation::{validate_email, validate_phone};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_party_size")]
    pub party_size: i32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub special_requests: String,
}

fn default_party_size() -> i32 {
    2
}

#[derive(Serialize)]
pub struct CreateReservationResponse {
    success: bool,
    reservation_id: i64,
    confirmation: String,
    message: String,
}

/// POST /api/reservations - create a table reservation
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    let name = req.name.trim();
    let email = req.email.trim();
    let phone = req.phone.trim();
    let date = req.date.trim();
    let time = req.time.trim();

    if name.is_empty() || email.is_empty() || phone.is_empty() || date.is_empty() || time.is_empty()
    {
        return Err(AppError::validation("Missing required fields"));
    }
    if !validate_email(email) {
        return Err(AppError::validation("Invalid email format"));
    }
    if !validate_phone(phone) {
        return Err(AppError::validation("Invalid phone format"));
    }
    if !(1..=20).contains(&req.party_size) {
        return Err(AppError::validation("Party size must be between 1 and 20"));
    }

    let reservation_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Invalid date format (use YYYY-MM-DD)"))?;
    if reservation_date < Local::now().date_naive() {
        return Err(AppError::validation("Reservation date cannot be in the past"));
    }

    let new_reservation = NewReservation {
        customer_name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        party_size: req.party_size,
        reservation_date,
        reservation_time: time.to_string(),
        special_requests: req.special_requests.trim().to_string(),
        status: ReservationStatus::Confirmed,
    };

    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let reservation_id = ReservationRepository::insert(&mut conn, &new_reservation).await?;

    tracing::info!(reservation_id, party_size = req.party_size, "Reservation created via API");

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            success: true,
            reservation_id,
            confirmation: format!("Table reserved for {name} on {date} at {time}"),
            message: format!("Reservation #{reservation_id} confirmed!"),
        }),
    ))
}

#[derive(Serialize)]
pub struct ReservationResponse {
    success: bool,
    reservation: Reservation,
}

/// GET /api/reservations/:id - reservation detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationResponse>> {
    let repo = ReservationRepository::new(state.db.pool().clone());
    let reservation = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation not found"))?;

    Ok(Json(ReservationResponse {
        success: true,
        reservation,
    }))
}

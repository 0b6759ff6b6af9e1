//! Reservation Repository

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use shared::models::{NewReservation, Reservation};

use super::{BaseRepository, RepoError, RepoResult};

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Insert a new reservation and return its assigned id.
    ///
    /// Takes a connection so the caller can commit the reservation together
    /// with its conversation-log entry in one transaction.
    pub async fn insert(
        conn: &mut SqliteConnection,
        reservation: &NewReservation,
    ) -> RepoResult<i64> {
        if !(1..=20).contains(&reservation.party_size) {
            return Err(RepoError::Validation(
                "Party size must be between 1 and 20".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO reservations
                (customer_name, email, phone, party_size, reservation_date,
                 reservation_time, special_requests, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reservation.customer_name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(reservation.party_size)
        .bind(reservation.reservation_date)
        .bind(&reservation.reservation_time)
        .bind(&reservation.special_requests)
        .bind(reservation.status)
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(self.base.pool())
            .await?;

        Ok(reservation)
    }
}

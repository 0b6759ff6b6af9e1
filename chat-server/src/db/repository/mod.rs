//! Repository Module
//!
//! CRUD access to the SQLite tables. Reads go through the pool held by
//! each repository; writes that must be atomic with other writes take a
//! `&mut SqliteConnection` so callers can run them inside one transaction.

pub mod conversation;
pub mod order;
pub mod reservation;
pub mod session;

// Re-exports
pub use conversation::ConversationRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use session::SessionRepository;

use sqlx::SqlitePool;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    pool: SqlitePool,
}

impl BaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

//! Repository Module
//!
//! Module-level CRUD functions over the SQLite pool. Functions that also
//! run inside transactions take `impl sqlx::Executor<'_, Database = Sqlite>`
//! and are called with `&mut *tx`.

pub mod author;
pub mod book;
pub mod credential;
pub mod customer;
pub mod order;
pub mod report;
pub mod role;
pub mod staff;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{1}")]
    Business(ErrorCode, String),

    #[error("Storage busy")]
    Busy,
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            // SQLITE_BUSY (5) / SQLITE_LOCKED (6); extended codes keep the
            // primary code in the low byte.
            if let Some(code) = db_err.code() {
                if let Ok(n) = code.parse::<u32>() {
                    if n & 0xFF == 5 || n & 0xFF == 6 {
                        return RepoError::Busy;
                    }
                }
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
            RepoError::Busy => AppError::new(ErrorCode::ResourceBusy),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Current time as Unix seconds, the storage format for timestamps
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

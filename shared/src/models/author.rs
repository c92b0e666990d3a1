//! Author Model

use serde::{Deserialize, Serialize};

/// Author entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Author {
    pub id: i64,
    /// Optional for single-name or anonymous authors
    pub first_name: Option<String>,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub description: Option<String>,
}

/// Create author payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCreate {
    pub first_name: Option<String>,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub description: Option<String>,
}

/// Update author payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub description: Option<String>,
}

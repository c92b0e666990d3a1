//! Credential Model

use serde::{Deserialize, Serialize};

/// Login credential (never carries the password hash over the API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Credential {
    pub id: i64,
    pub username: String,
    /// Display names mirrored from the owning staff profile on sync
    pub first_name: String,
    pub last_name: String,
    /// Empty string when the staff profile has no email
    pub email: String,
    pub is_active: bool,
    pub created_at: i64,
    pub last_login_at: Option<i64>,
}

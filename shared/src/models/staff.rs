//! Staff Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Staff member entity (profile record; login lives on the linked credential)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Staff {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique contact email, optional for legacy records
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    /// Role reference; exactly one role per staff member
    pub role_id: i64,
    /// Linked login credential, absent for staff without system access
    pub credential_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create staff payload
///
/// Creation always provisions a login credential, so a password is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub role_id: i64,
    pub password: String,
}

/// Update staff payload (password changes go through the dedicated endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub role_id: Option<i64>,
    pub is_active: Option<bool>,
}

/// Set password payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSetPassword {
    pub password: String,
}

/// Staff member with resolved credential/role info (for detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDetail {
    #[serde(flatten)]
    pub staff: Staff,
    /// Login username, absent when no credential is linked
    pub username: Option<String>,
    pub role_name: String,
}

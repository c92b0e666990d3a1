//! Order Model

use super::book::Book;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// One-way machine: `Open` -> `Completed`. There is no path back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Open,
    Completed,
}

/// Payment method recorded on the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentMethod {
    Cash,
    Check,
    Credit,
    Other,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Staff member who took the order
    pub staff_id: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Current total in currency units; kept in sync by explicit recompute
    pub total_amount: f64,
    /// Completion timestamp (Unix seconds), set exactly once
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: i64,
    pub staff_id: i64,
    pub payment_method: PaymentMethod,
    /// Book references; a book can appear at most once per order
    #[serde(default)]
    pub book_ids: Vec<i64>,
}

/// Update order payload (open orders only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    /// When present, replaces the full book set
    pub book_ids: Option<Vec<i64>>,
}

/// Order with resolved books (for detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub books: Vec<Book>,
}

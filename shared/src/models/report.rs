//! Sales report models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-staff sales summary over an optional date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSalesReport {
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub orders_completed: i64,
    pub books_sold: i64,
    /// Revenue in currency units, summed from completed order totals
    pub revenue: f64,
}

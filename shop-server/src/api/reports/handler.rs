//! Sales Report Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{report, staff};
use shared::error::{AppError, AppResult};
use shared::models::StaffSalesReport;

/// Date range filter; both bounds are inclusive calendar days
#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/reports/staff/{id}/sales - Sales summary for one staff member
pub async fn staff_sales(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<StaffSalesReport>> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(AppError::validation("start_date must not be after end_date"));
        }
    }

    let member = staff::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", id)))?;

    // Inclusive day range becomes a half-open timestamp range
    let start_ts = query.start_date.map(day_start_ts);
    let end_ts = query.end_date.and_then(|d| d.succ_opt()).map(day_start_ts);

    let totals = report::staff_sales_totals(state.pool(), id, start_ts, end_ts).await?;

    Ok(Json(StaffSalesReport {
        staff_id: member.id,
        first_name: member.first_name,
        last_name: member.last_name,
        start_date: query.start_date,
        end_date: query.end_date,
        orders_completed: totals.orders_completed,
        books_sold: totals.books_sold,
        revenue: totals.revenue,
    }))
}

fn day_start_ts(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

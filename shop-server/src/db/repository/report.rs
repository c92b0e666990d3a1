//! Sales Report Repository
//!
//! Aggregations over completed orders. Open orders never count towards
//! sales figures.

use super::RepoResult;
use sqlx::SqlitePool;

/// Aggregated sales figures for one staff member
#[derive(Debug, sqlx::FromRow)]
pub struct StaffSalesTotals {
    pub orders_completed: i64,
    pub books_sold: i64,
    pub revenue: f64,
}

/// Completed-order totals for a staff member, bounded by an optional
/// half-open `[start, end)` range on the completion timestamp
pub async fn staff_sales_totals(
    pool: &SqlitePool,
    staff_id: i64,
    start_ts: Option<i64>,
    end_ts: Option<i64>,
) -> RepoResult<StaffSalesTotals> {
    let totals = sqlx::query_as::<_, StaffSalesTotals>(
        "SELECT COUNT(*) AS orders_completed, \
         COALESCE(SUM((SELECT COUNT(*) FROM order_book ob WHERE ob.order_id = o.id)), 0) AS books_sold, \
         COALESCE(SUM(o.total_amount), 0.0) AS revenue \
         FROM shop_order o \
         WHERE o.staff_id = ?1 AND o.status = 'completed' \
         AND (?2 IS NULL OR o.completed_at >= ?2) \
         AND (?3 IS NULL OR o.completed_at < ?3)",
    )
    .bind(staff_id)
    .bind(start_ts)
    .bind(end_ts)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

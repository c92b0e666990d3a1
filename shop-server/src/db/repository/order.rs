//! Order Repository
//!
//! Row-level operations for orders and their book membership. Lifecycle
//! rules (recompute, completion) live in `crate::orders`.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Book, Order, OrderUpdate, PaymentMethod};
use sqlx::{Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, customer_id, staff_id, status, payment_method, total_amount, completed_at, created_at, updated_at FROM shop_order ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_id(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, customer_id, staff_id, status, payment_method, total_amount, completed_at, created_at, updated_at FROM shop_order WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(order)
}

/// Books currently associated with an order, in insertion order
pub async fn books_for_order(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    order_id: i64,
) -> RepoResult<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT b.id, b.legacy_id, b.title, b.cost, b.retail_price, b.rating, b.status, b.publication_date, b.publisher, b.edition, b.created_at, b.updated_at FROM book b INNER JOIN order_book ob ON ob.book_id = b.id WHERE ob.order_id = ? ORDER BY ob.id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(books)
}

pub async fn insert(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    customer_id: i64,
    staff_id: i64,
    payment_method: PaymentMethod,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO shop_order (customer_id, staff_id, payment_method, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(staff_id)
    .bind(payment_method)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// Partial update of the order head (customer, staff, payment method)
pub async fn update_head(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    data: &OrderUpdate,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE shop_order SET customer_id = COALESCE(?1, customer_id), staff_id = COALESCE(?2, staff_id), payment_method = COALESCE(?3, payment_method), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.customer_id)
    .bind(data.staff_id)
    .bind(data.payment_method)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(rows)
}

/// Replace the full book set of an order
///
/// Rejects payloads that repeat a book and payloads referencing unknown
/// books; the UNIQUE(order_id, book_id) constraint backs this up.
pub async fn replace_books(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    order_id: i64,
    book_ids: &[i64],
) -> RepoResult<()> {
    let mut seen = std::collections::HashSet::new();
    for book_id in book_ids {
        if !seen.insert(*book_id) {
            return Err(RepoError::Business(
                ErrorCode::DuplicateOrderBook,
                format!("Book {book_id} appears more than once"),
            ));
        }
    }

    sqlx::query("DELETE FROM order_book WHERE order_id = ?")
        .bind(order_id)
        .execute(&mut **tx)
        .await?;

    for book_id in book_ids {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book WHERE id = ?")
            .bind(book_id)
            .fetch_one(&mut **tx)
            .await?;
        if exists == 0 {
            return Err(RepoError::Business(
                ErrorCode::BookNotFound,
                format!("Book {book_id} not found"),
            ));
        }
        sqlx::query("INSERT INTO order_book (order_id, book_id) VALUES (?, ?)")
            .bind(order_id)
            .bind(book_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub async fn set_total(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    total: f64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE shop_order SET total_amount = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(total)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Acquire the write lock on the order row early in a transaction.
///
/// Returns 0 affected rows when the order does not exist.
pub async fn touch(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query("UPDATE shop_order SET updated_at = updated_at WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?
        .rows_affected();
    Ok(rows)
}

/// Compare-and-set the one-way `open` -> `completed` transition.
///
/// Returns 0 affected rows when the order was not `open`.
pub async fn mark_completed(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    total: f64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE shop_order SET status = 'completed', completed_at = ?1, total_amount = ?2, updated_at = ?1 WHERE id = ?3 AND status = 'open'",
    )
    .bind(now)
    .bind(total)
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(rows)
}

/// Delete an open order; completed orders are sales history and stay
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let order = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    if order.status == shared::models::OrderStatus::Completed {
        return Err(RepoError::Business(
            ErrorCode::OrderAlreadyCompleted,
            format!("Order {id} is completed and cannot be deleted"),
        ));
    }

    sqlx::query("DELETE FROM shop_order WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

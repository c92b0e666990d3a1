//! Order Service
//!
//! Orders move one way, open to completed. The stored total is never
//! computed implicitly: every mutation that changes which books belong
//! to an order recomputes it from current retail prices in the same
//! transaction. Completion does its checks and effects atomically,
//! relying on the write lock taken by its first statement.

pub mod money;

use crate::db::repository::{RepoError, book, customer, now_ts, order, staff};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{BookStatus, Order, OrderCreate, OrderStatus, OrderUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Order {0} has no books")]
    Empty(i64),

    #[error("Book '{title}' is not available")]
    BookUnavailable { book_id: i64, title: String },

    #[error("Order {0} is already completed")]
    AlreadyCompleted(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
            }
            OrderError::Empty(_) => AppError::with_message(
                ErrorCode::OrderEmpty,
                "Cannot complete an order with no books",
            ),
            OrderError::BookUnavailable { book_id, title } => AppError::with_message(
                ErrorCode::BookUnavailable,
                format!("Book '{title}' is not available"),
            )
            .with_detail("book_id", serde_json::json!(book_id)),
            OrderError::AlreadyCompleted(id) => AppError::with_message(
                ErrorCode::OrderAlreadyCompleted,
                format!("Order {id} is already completed"),
            ),
            OrderError::Repo(e) => e.into(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Create an order, recomputing the total for any initial books
pub async fn create_order(pool: &SqlitePool, data: OrderCreate) -> OrderResult<Order> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    customer::find_by_id(&mut *tx, data.customer_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", data.customer_id)))?;
    staff::find_by_id(&mut *tx, data.staff_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", data.staff_id)))?;

    let order_id = order::insert(
        &mut *tx,
        data.customer_id,
        data.staff_id,
        data.payment_method,
        now_ts(),
    )
    .await?;
    order::replace_books(&mut tx, order_id, &data.book_ids).await?;
    recompute_in_tx(&mut tx, order_id).await?;

    tx.commit().await.map_err(RepoError::from)?;

    order::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))
}

/// Update an order's head fields and, when given, its book membership
///
/// Completed orders are frozen. Replacing the book set recomputes the
/// total in the same transaction.
pub async fn update_order(pool: &SqlitePool, order_id: i64, data: OrderUpdate) -> OrderResult<Order> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if order::touch(&mut *tx, order_id).await? == 0 {
        return Err(OrderError::NotFound(order_id));
    }
    let existing = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))?;
    if existing.status == OrderStatus::Completed {
        return Err(OrderError::AlreadyCompleted(order_id));
    }

    if let Some(customer_id) = data.customer_id {
        customer::find_by_id(&mut *tx, customer_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {customer_id} not found")))?;
    }
    if let Some(staff_id) = data.staff_id {
        staff::find_by_id(&mut *tx, staff_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {staff_id} not found")))?;
    }

    order::update_head(&mut *tx, order_id, &data, now_ts()).await?;
    if let Some(book_ids) = &data.book_ids {
        order::replace_books(&mut tx, order_id, book_ids).await?;
        recompute_in_tx(&mut tx, order_id).await?;
    }

    tx.commit().await.map_err(RepoError::from)?;

    order::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))
}

/// Recompute and store the order total from current retail prices
///
/// An order with no books totals zero. Completed orders keep the total
/// recorded at completion. Returns the freshly computed total.
pub async fn recompute_order_total(pool: &SqlitePool, order_id: i64) -> OrderResult<Decimal> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if order::touch(&mut *tx, order_id).await? == 0 {
        return Err(OrderError::NotFound(order_id));
    }
    let existing = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))?;
    if existing.status == OrderStatus::Completed {
        return Err(OrderError::AlreadyCompleted(order_id));
    }
    let total = recompute_in_tx(&mut tx, order_id).await?;

    tx.commit().await.map_err(RepoError::from)?;
    Ok(total)
}

/// Complete an open order
///
/// All checks and effects happen in one transaction whose first
/// statement takes the database write lock, so two racing completions
/// serialize and the loser sees the winner's committed state. Checks
/// run in a fixed sequence: the order must have books, must still be
/// open, and every book must be available. On success the books are
/// marked sold, the completion timestamp is set exactly once and the
/// total is recomputed from the prices current at completion.
pub async fn complete_order(pool: &SqlitePool, order_id: i64) -> OrderResult<Order> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if order::touch(&mut *tx, order_id).await? == 0 {
        return Err(OrderError::NotFound(order_id));
    }
    let existing = order::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))?;
    let books = order::books_for_order(&mut *tx, order_id).await?;

    if books.is_empty() {
        return Err(OrderError::Empty(order_id));
    }
    if existing.status != OrderStatus::Open {
        return Err(OrderError::AlreadyCompleted(order_id));
    }
    if let Some(unavailable) = books.iter().find(|b| b.status != BookStatus::Available) {
        return Err(OrderError::BookUnavailable {
            book_id: unavailable.id,
            title: unavailable.title.clone(),
        });
    }

    let now = now_ts();
    for book in &books {
        if book::mark_sold(&mut *tx, book.id, now).await? == 0 {
            return Err(OrderError::BookUnavailable {
                book_id: book.id,
                title: book.title.clone(),
            });
        }
    }
    let total = money::sum_prices(books.iter().map(|b| b.retail_price));
    if order::mark_completed(&mut *tx, order_id, money::to_f64(total), now).await? == 0 {
        return Err(OrderError::AlreadyCompleted(order_id));
    }

    tx.commit().await.map_err(RepoError::from)?;
    tracing::info!(order_id, total = %total, books = books.len(), "Order completed");

    order::find_by_id(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound(order_id))
}

async fn recompute_in_tx(tx: &mut Transaction<'_, Sqlite>, order_id: i64) -> OrderResult<Decimal> {
    let books = order::books_for_order(&mut **tx, order_id).await?;
    let total = money::sum_prices(books.iter().map(|b| b.retail_price));
    order::set_total(&mut **tx, order_id, money::to_f64(total), now_ts()).await?;
    Ok(total)
}

//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::{self, money};
use shared::error::{AppError, AppResult};
use shared::models::{Order, OrderCreate, OrderDetail, OrderUpdate};

/// GET /api/orders - List orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(state.pool()).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - Get order with its books
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let order = order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    let books = order::books_for_order(state.pool(), id).await?;

    Ok(Json(OrderDetail { order, books }))
}

/// POST /api/orders - Create order (total recomputed on creation)
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        customer_id = payload.customer_id,
        "Creating order"
    );

    let order = orders::create_order(state.pool(), payload).await?;
    let books = order::books_for_order(state.pool(), order.id).await?;
    Ok(Json(OrderDetail { order, books }))
}

/// PUT /api/orders/{id} - Update open order
///
/// Replacing the book set recomputes the total in the same transaction.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderDetail>> {
    let order = orders::update_order(state.pool(), id, payload).await?;
    let books = order::books_for_order(state.pool(), id).await?;
    Ok(Json(OrderDetail { order, books }))
}

/// DELETE /api/orders/{id} - Delete open order
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        order_id = id,
        "Deleting order"
    );

    let deleted = order::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

/// Recompute response
#[derive(Debug, Serialize)]
pub struct RecomputeResponse {
    pub order_id: i64,
    pub total: f64,
}

/// POST /api/orders/{id}/recompute - Re-derive the total from current prices
pub async fn recompute_total(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RecomputeResponse>> {
    let total = orders::recompute_order_total(state.pool(), id).await?;
    Ok(Json(RecomputeResponse {
        order_id: id,
        total: money::to_f64(total),
    }))
}

/// POST /api/orders/{id}/complete - Complete an open order
///
/// Marks every book sold, stamps the completion time and freezes the
/// final total, all in one transaction.
pub async fn complete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        order_id = id,
        "Completing order"
    );

    let order = orders::complete_order(state.pool(), id).await?;
    let books = order::books_for_order(state.pool(), id).await?;
    Ok(Json(OrderDetail { order, books }))
}

//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::customer;
use shared::error::{AppError, AppResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

/// GET /api/customers - List customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(state.pool()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/{id} - Get customer by ID
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", id)))?;
    Ok(Json(customer))
}

/// POST /api/customers - Create customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    let customer = customer::create(state.pool(), payload).await?;
    Ok(Json(customer))
}

/// PUT /api/customers/{id} - Update customer
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    let customer = customer::update(state.pool(), id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/{id} - Delete customer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = customer::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

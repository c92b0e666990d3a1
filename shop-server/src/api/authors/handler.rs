//! Author API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::author;
use shared::error::{AppError, AppResult};
use shared::models::{Author, AuthorCreate, AuthorUpdate};

/// GET /api/authors - List authors
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Author>>> {
    let authors = author::find_all(state.pool()).await?;
    Ok(Json(authors))
}

/// GET /api/authors/{id} - Get author by ID
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Author>> {
    let author = author::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Author {} not found", id)))?;
    Ok(Json(author))
}

/// POST /api/authors - Create author
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AuthorCreate>,
) -> AppResult<Json<Author>> {
    let author = author::create(state.pool(), payload).await?;
    Ok(Json(author))
}

/// PUT /api/authors/{id} - Update author
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AuthorUpdate>,
) -> AppResult<Json<Author>> {
    let author = author::update(state.pool(), id, payload).await?;
    Ok(Json(author))
}

/// DELETE /api/authors/{id} - Delete author
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = author::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

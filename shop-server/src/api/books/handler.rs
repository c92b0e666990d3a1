//! Book API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{author, book};
use shared::error::{AppError, AppResult};
use shared::models::{Book, BookCreate, BookDetail, BookUpdate};

/// GET /api/books - List books
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Book>>> {
    let books = book::find_all(state.pool()).await?;
    Ok(Json(books))
}

/// GET /api/books/{id} - Get book with its authors
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookDetail>> {
    let book = book::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Book {} not found", id)))?;
    let authors = author::find_for_book(state.pool(), id).await?;

    Ok(Json(BookDetail { book, authors }))
}

/// POST /api/books - Create book
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookCreate>,
) -> AppResult<Json<BookDetail>> {
    let book = book::create(state.pool(), payload).await?;
    let authors = author::find_for_book(state.pool(), book.id).await?;
    Ok(Json(BookDetail { book, authors }))
}

/// PUT /api/books/{id} - Update book
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookUpdate>,
) -> AppResult<Json<BookDetail>> {
    let book = book::update(state.pool(), id, payload).await?;
    let authors = author::find_for_book(state.pool(), id).await?;
    Ok(Json(BookDetail { book, authors }))
}

/// DELETE /api/books/{id} - Delete book
///
/// Books referenced by any order are refused.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = book::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

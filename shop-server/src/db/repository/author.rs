//! Author Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Author, AuthorCreate, AuthorUpdate};
use sqlx::{Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Author>> {
    let authors = sqlx::query_as::<_, Author>(
        "SELECT id, first_name, last_name, birth_year, death_year, description FROM author ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;
    Ok(authors)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Author>> {
    let author = sqlx::query_as::<_, Author>(
        "SELECT id, first_name, last_name, birth_year, death_year, description FROM author WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(author)
}

/// Authors of one book, in name order
pub async fn find_for_book(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    book_id: i64,
) -> RepoResult<Vec<Author>> {
    let authors = sqlx::query_as::<_, Author>(
        "SELECT a.id, a.first_name, a.last_name, a.birth_year, a.death_year, a.description FROM author a INNER JOIN book_author ba ON ba.author_id = a.id WHERE ba.book_id = ? ORDER BY a.last_name, a.first_name",
    )
    .bind(book_id)
    .fetch_all(executor)
    .await?;
    Ok(authors)
}

pub async fn create(pool: &SqlitePool, data: AuthorCreate) -> RepoResult<Author> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO author (first_name, last_name, birth_year, death_year, description) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.birth_year)
    .bind(data.death_year)
    .bind(&data.description)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create author".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AuthorUpdate) -> RepoResult<Author> {
    let rows = sqlx::query(
        "UPDATE author SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), birth_year = COALESCE(?3, birth_year), death_year = COALESCE(?4, death_year), description = COALESCE(?5, description) WHERE id = ?6",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.birth_year)
    .bind(data.death_year)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Author {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Author {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Author {id} not found")))?;

    let in_use = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_author WHERE author_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if in_use > 0 {
        return Err(RepoError::Business(
            ErrorCode::AuthorInUse,
            format!("Author {id} is referenced by {in_use} book(s)"),
        ));
    }

    sqlx::query("DELETE FROM author WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

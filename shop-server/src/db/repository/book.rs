//! Book Repository

use super::{RepoError, RepoResult, now_ts};
use shared::error::ErrorCode;
use shared::models::{Book, BookCreate, BookUpdate};
use sqlx::{Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT id, legacy_id, title, cost, retail_price, rating, status, publication_date, publisher, edition, created_at, updated_at FROM book ORDER BY title",
    )
    .fetch_all(pool)
    .await?;
    Ok(books)
}

pub async fn find_by_id(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, legacy_id, title, cost, retail_price, rating, status, publication_date, publisher, edition, created_at, updated_at FROM book WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(book)
}

pub async fn create(pool: &SqlitePool, data: BookCreate) -> RepoResult<Book> {
    let now = now_ts();
    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO book (legacy_id, title, cost, retail_price, rating, status, publication_date, publisher, edition, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.legacy_id)
    .bind(&data.title)
    .bind(data.cost)
    .bind(data.retail_price)
    .bind(data.rating)
    .bind(data.status)
    .bind(data.publication_date)
    .bind(&data.publisher)
    .bind(&data.edition)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    replace_authors(&mut tx, id, &data.author_ids).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create book".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BookUpdate) -> RepoResult<Book> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE book SET legacy_id = COALESCE(?1, legacy_id), title = COALESCE(?2, title), cost = COALESCE(?3, cost), retail_price = COALESCE(?4, retail_price), rating = COALESCE(?5, rating), status = COALESCE(?6, status), publication_date = COALESCE(?7, publication_date), publisher = COALESCE(?8, publisher), edition = COALESCE(?9, edition), updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.legacy_id)
    .bind(&data.title)
    .bind(data.cost)
    .bind(data.retail_price)
    .bind(data.rating)
    .bind(data.status)
    .bind(data.publication_date)
    .bind(&data.publisher)
    .bind(&data.edition)
    .bind(now_ts())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Book {id} not found")));
    }

    if let Some(author_ids) = &data.author_ids {
        replace_authors(&mut tx, id, author_ids).await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Book {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Book {id} not found")))?;

    let in_orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_book WHERE book_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if in_orders > 0 {
        return Err(RepoError::Business(
            ErrorCode::BookInOrder,
            format!("Book {id} is referenced by {in_orders} order(s)"),
        ));
    }

    sqlx::query("DELETE FROM book WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Compare-and-set the availability transition to `sold`.
///
/// Returns the number of affected rows: 0 means the book was not
/// `available` at the time of the update.
pub async fn mark_sold(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE book SET status = 'sold', updated_at = ?1 WHERE id = ?2 AND status = 'available'",
    )
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(rows)
}

/// Replace the full author set of a book
async fn replace_authors(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    book_id: i64,
    author_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM book_author WHERE book_id = ?")
        .bind(book_id)
        .execute(&mut **tx)
        .await?;

    for author_id in author_ids {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM author WHERE id = ?")
            .bind(author_id)
            .fetch_one(&mut **tx)
            .await?;
        if exists == 0 {
            return Err(RepoError::Business(
                ErrorCode::AuthorNotFound,
                format!("Author {author_id} not found"),
            ));
        }
        sqlx::query("INSERT OR IGNORE INTO book_author (book_id, author_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(author_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

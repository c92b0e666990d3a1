//! Customer Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let customers = sqlx::query_as::<_, Customer>(
        "SELECT id, first_name, last_name, phone_number, mailing_address FROM customer ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;
    Ok(customers)
}

pub async fn find_by_id(
    executor: impl sqlx::Executor<'_, Database = sqlx::Sqlite>,
    id: i64,
) -> RepoResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, first_name, last_name, phone_number, mailing_address FROM customer WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(customer)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    if data.first_name.is_none() && data.last_name.is_none() {
        return Err(RepoError::Business(
            ErrorCode::CustomerNameRequired,
            "Customer requires a first or last name".into(),
        ));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO customer (first_name, last_name, phone_number, mailing_address) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone_number)
    .bind(&data.mailing_address)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    let rows = sqlx::query(
        "UPDATE customer SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), phone_number = COALESCE(?3, phone_number), mailing_address = COALESCE(?4, mailing_address) WHERE id = ?5",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone_number)
    .bind(&data.mailing_address)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))?;

    sqlx::query("DELETE FROM customer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

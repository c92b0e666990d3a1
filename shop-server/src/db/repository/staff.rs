//! Staff Repository

use super::{RepoError, RepoResult};
use shared::models::{Staff, StaffCreate, StaffUpdate};
use sqlx::{Sqlite, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, first_name, last_name, email, phone_number, address, zip_code, state, birth_date, hire_date, role_id, credential_id, is_active, created_at, updated_at FROM staff ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;
    Ok(staff)
}

pub async fn find_by_id(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, first_name, last_name, email, phone_number, address, zip_code, state, birth_date, hire_date, role_id, credential_id, is_active, created_at, updated_at FROM staff WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(staff)
}

pub async fn find_by_credential(pool: &SqlitePool, credential_id: i64) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, first_name, last_name, email, phone_number, address, zip_code, state, birth_date, hire_date, role_id, credential_id, is_active, created_at, updated_at FROM staff WHERE credential_id = ? LIMIT 1",
    )
    .bind(credential_id)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn insert(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    data: &StaffCreate,
    credential_id: i64,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO staff (first_name, last_name, email, phone_number, address, zip_code, state, birth_date, hire_date, role_id, credential_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(&data.address)
    .bind(&data.zip_code)
    .bind(&data.state)
    .bind(data.birth_date)
    .bind(data.hire_date)
    .bind(data.role_id)
    .bind(credential_id)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// Partial profile update. Fields left `None` keep their stored value.
pub async fn update_profile(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    data: &StaffUpdate,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE staff SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), email = COALESCE(?3, email), phone_number = COALESCE(?4, phone_number), address = COALESCE(?5, address), zip_code = COALESCE(?6, zip_code), state = COALESCE(?7, state), birth_date = COALESCE(?8, birth_date), hire_date = COALESCE(?9, hire_date), role_id = COALESCE(?10, role_id), is_active = COALESCE(?11, is_active), updated_at = ?12 WHERE id = ?13",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(&data.address)
    .bind(&data.zip_code)
    .bind(&data.state)
    .bind(data.birth_date)
    .bind(data.hire_date)
    .bind(data.role_id)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(rows)
}

/// Delete a staff member together with its login credential
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let staff = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Staff {id} not found")))?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM staff WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if let Some(credential_id) = staff.credential_id {
        sqlx::query("DELETE FROM credential WHERE id = ?")
            .bind(credential_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(true)
}

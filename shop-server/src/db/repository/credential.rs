//! Credential Repository
//!
//! Login accounts. The password hash stays inside this module's auth row
//! type and is never part of the shared `Credential` model.

use super::RepoResult;
use shared::models::Credential;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

/// Server-internal row for password verification
#[derive(Debug, sqlx::FromRow)]
pub struct CredentialAuth {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
}

pub async fn find_by_id(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Credential>> {
    let credential = sqlx::query_as::<_, Credential>(
        "SELECT id, username, first_name, last_name, email, is_active, created_at, last_login_at FROM credential WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(credential)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Credential>> {
    let credential = sqlx::query_as::<_, Credential>(
        "SELECT id, username, first_name, last_name, email, is_active, created_at, last_login_at FROM credential WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(credential)
}

pub async fn find_auth_by_username(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<CredentialAuth>> {
    let auth = sqlx::query_as::<_, CredentialAuth>(
        "SELECT id, username, password_hash, is_active FROM credential WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(auth)
}

/// Whether a username is taken, optionally ignoring one credential row
/// (so re-syncing a credential never collides with itself)
pub async fn username_exists(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    username: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM credential WHERE username = ?1 AND (?2 IS NULL OR id != ?2)",
    )
    .bind(username)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn insert(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    username: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO credential (username, password_hash, first_name, last_name, email, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// Overwrite the mirrored profile fields (names, email, username)
pub async fn sync_profile(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    first_name: &str,
    last_name: &str,
    email: &str,
    username: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE credential SET first_name = ?, last_name = ?, email = ?, username = ? WHERE id = ?",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(username)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn set_password_hash(
    executor: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
    password_hash: &str,
) -> RepoResult<()> {
    sqlx::query("UPDATE credential SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Replace all role memberships with exactly one role
pub async fn replace_groups(
    conn: &mut SqliteConnection,
    credential_id: i64,
    role_id: i64,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM credential_group WHERE credential_id = ?")
        .bind(credential_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("INSERT INTO credential_group (credential_id, role_id) VALUES (?, ?)")
        .bind(credential_id)
        .bind(role_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Role ids this credential belongs to (sync keeps this at one entry)
pub async fn group_role_ids(pool: &SqlitePool, credential_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT role_id FROM credential_group WHERE credential_id = ? ORDER BY role_id",
    )
    .bind(credential_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn touch_last_login(pool: &SqlitePool, id: i64, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE credential SET last_login_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

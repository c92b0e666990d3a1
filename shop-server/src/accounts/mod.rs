//! Account Service
//!
//! Staff profiles own the identity data; each active profile is linked
//! to one login credential. Every mutation that touches a profile runs
//! the credential sync in the same transaction, so names, email,
//! username and role membership never drift apart.

pub mod password;
pub mod username;

use crate::db::repository::{credential, now_ts, role, staff};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Credential, Staff, StaffCreate, StaffUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::ValidateEmail;

/// Create a staff profile together with its login credential
///
/// Username generation, credential insert, role membership and the
/// staff row all commit atomically. A failed password policy check or
/// an unknown role leaves nothing behind.
pub async fn create_staff_with_credential(
    pool: &SqlitePool,
    mut data: StaffCreate,
) -> AppResult<Staff> {
    data.first_name = data.first_name.trim().to_string();
    data.last_name = data.last_name.trim().to_string();
    if data.first_name.is_empty() || data.last_name.is_empty() {
        return Err(AppError::validation("First and last name are required"));
    }
    check_email(data.email.as_ref())?;
    password::validate_password(&data.password)?;

    // Hash outside the transaction, Argon2 is deliberately slow
    let password_hash = password::hash_password(&data.password)?;
    let now = now_ts();

    let mut tx = pool.begin().await.map_err(|e| {
        AppError::database(format!("Failed to start transaction: {e}"))
    })?;

    let role = role::find_by_id(&mut *tx, data.role_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::RoleGroupRequired,
            format!("Role {} does not exist", data.role_id),
        )
    })?;

    let handle =
        username::generate_unique(&mut tx, &data.first_name, &data.last_name, None).await?;
    let email = data.email.clone().unwrap_or_default();
    let credential_id = credential::insert(
        &mut *tx,
        &handle,
        &password_hash,
        &data.first_name,
        &data.last_name,
        &email,
        now,
    )
    .await?;
    credential::replace_groups(&mut tx, credential_id, role.id).await?;
    let staff_id = staff::insert(&mut *tx, &data, credential_id, now).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit: {e}")))?;

    tracing::info!(staff_id, username = %handle, "Created staff with credential");

    staff::find_by_id(pool, staff_id)
        .await?
        .ok_or_else(|| AppError::database("Staff vanished after create"))
}

/// Update a staff profile and re-sync its credential in one transaction
pub async fn update_staff(
    pool: &SqlitePool,
    staff_id: i64,
    mut data: StaffUpdate,
) -> AppResult<Staff> {
    data.first_name = data.first_name.map(|name| name.trim().to_string());
    data.last_name = data.last_name.map(|name| name.trim().to_string());
    if matches!(&data.first_name, Some(name) if name.is_empty())
        || matches!(&data.last_name, Some(name) if name.is_empty())
    {
        return Err(AppError::validation("First and last name cannot be blank"));
    }
    check_email(data.email.as_ref())?;

    let mut tx = pool.begin().await.map_err(|e| {
        AppError::database(format!("Failed to start transaction: {e}"))
    })?;

    if let Some(role_id) = data.role_id {
        role::find_by_id(&mut *tx, role_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RoleGroupRequired,
                format!("Role {role_id} does not exist"),
            )
        })?;
    }

    let rows = staff::update_profile(&mut *tx, staff_id, &data, now_ts()).await?;
    if rows == 0 {
        return Err(staff_not_found(staff_id));
    }
    let updated = staff::find_by_id(&mut *tx, staff_id)
        .await?
        .ok_or_else(|| staff_not_found(staff_id))?;
    sync_in_tx(&mut tx, &updated).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit: {e}")))?;
    Ok(updated)
}

/// Re-sync the login credential from the staff profile
///
/// Idempotent: running it twice leaves the same state. Staff without a
/// linked credential are skipped and `None` is returned.
pub async fn sync_staff_credential(
    pool: &SqlitePool,
    staff_id: i64,
) -> AppResult<Option<Credential>> {
    let mut tx = pool.begin().await.map_err(|e| {
        AppError::database(format!("Failed to start transaction: {e}"))
    })?;

    let staff = staff::find_by_id(&mut *tx, staff_id)
        .await?
        .ok_or_else(|| staff_not_found(staff_id))?;
    let Some(credential_id) = staff.credential_id else {
        tracing::debug!(staff_id, "No linked credential, sync skipped");
        return Ok(None);
    };

    sync_in_tx(&mut tx, &staff).await?;
    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit: {e}")))?;

    Ok(credential::find_by_id(pool, credential_id).await?)
}

/// Set a new password on the staff member's credential
pub async fn set_staff_password(pool: &SqlitePool, staff_id: i64, new_password: &str) -> AppResult<()> {
    let staff = staff::find_by_id(pool, staff_id)
        .await?
        .ok_or_else(|| staff_not_found(staff_id))?;
    let Some(credential_id) = staff.credential_id else {
        return Err(AppError::with_message(
            ErrorCode::CredentialMissing,
            format!("Staff {staff_id} has no linked credential"),
        ));
    };

    password::validate_password(new_password)?;
    let password_hash = password::hash_password(new_password)?;
    credential::set_password_hash(pool, credential_id, &password_hash).await?;
    tracing::info!(staff_id, credential_id, "Password changed");
    Ok(())
}

/// Mirror profile fields and role membership onto the linked credential
///
/// The username is regenerated only when the stored one no longer
/// encodes the current names; a settled handle (base or base plus
/// collision suffix) is kept stable.
async fn sync_in_tx(tx: &mut Transaction<'_, Sqlite>, staff: &Staff) -> AppResult<()> {
    let Some(credential_id) = staff.credential_id else {
        return Ok(());
    };
    let current = credential::find_by_id(&mut **tx, credential_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CredentialMissing,
                format!("Credential {credential_id} is linked but missing"),
            )
        })?;

    let handle = if username::encodes_names(&current.username, &staff.first_name, &staff.last_name)
    {
        current.username
    } else {
        let regenerated = username::generate_unique(
            &mut **tx,
            &staff.first_name,
            &staff.last_name,
            Some(credential_id),
        )
        .await?;
        tracing::info!(
            staff_id = staff.id,
            old = %current.username,
            new = %regenerated,
            "Username regenerated after name change"
        );
        regenerated
    };

    let email = staff.email.clone().unwrap_or_default();
    credential::sync_profile(
        &mut **tx,
        credential_id,
        &staff.first_name,
        &staff.last_name,
        &email,
        &handle,
    )
    .await?;
    credential::replace_groups(tx, credential_id, staff.role_id).await?;
    Ok(())
}

/// Reject malformed email addresses; absent or empty passes
fn check_email(email: Option<&String>) -> AppResult<()> {
    match email {
        Some(e) if !e.is_empty() && !e.validate_email() => Err(AppError::validation(format!(
            "Invalid email address: {e}"
        ))),
        _ => Ok(()),
    }
}

fn staff_not_found(staff_id: i64) -> AppError {
    AppError::with_message(ErrorCode::StaffNotFound, format!("Staff {staff_id} not found"))
}

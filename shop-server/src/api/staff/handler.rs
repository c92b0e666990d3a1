//! Staff API Handlers
//!
//! Profile mutations go through the account service so the linked
//! credential is synchronized in the same transaction.

use axum::Json;
use axum::extract::{Path, State};

use crate::accounts;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{credential, role, staff};
use shared::error::{AppError, AppResult};
use shared::models::{Credential, Staff, StaffCreate, StaffDetail, StaffSetPassword, StaffUpdate};

/// GET /api/staff - List staff members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Staff>>> {
    let members = staff::find_all(state.pool()).await?;
    Ok(Json(members))
}

/// GET /api/staff/{id} - Get staff member with credential and role info
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffDetail>> {
    let member = staff::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", id)))?;

    Ok(Json(to_detail(&state, member).await?))
}

/// POST /api/staff - Create staff member with login credential
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffDetail>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        "Creating staff member"
    );

    let member = accounts::create_staff_with_credential(state.pool(), payload).await?;
    Ok(Json(to_detail(&state, member).await?))
}

/// PUT /api/staff/{id} - Update staff member (credential synced)
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<StaffDetail>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        staff_id = id,
        "Updating staff member"
    );

    let member = accounts::update_staff(state.pool(), id, payload).await?;
    Ok(Json(to_detail(&state, member).await?))
}

/// DELETE /api/staff/{id} - Delete staff member and linked credential
///
/// Deleting the staff record behind your own login is refused, so an
/// operator cannot lock themselves out mid-session.
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if let Some(own) = staff::find_by_credential(state.pool(), current_user.id).await? {
        if own.id == id {
            return Err(AppError::new(shared::error::ErrorCode::CannotDeleteSelf));
        }
    }

    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        staff_id = id,
        "Deleting staff member"
    );

    let deleted = staff::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

/// POST /api/staff/{id}/sync - Re-mirror profile data onto the credential
///
/// Returns the refreshed credential, or `null` when the staff member has
/// no linked credential.
pub async fn sync_credential(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Credential>>> {
    let synced = accounts::sync_staff_credential(state.pool(), id).await?;
    Ok(Json(synced))
}

/// POST /api/staff/{id}/password - Set a new login password
pub async fn set_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StaffSetPassword>,
) -> AppResult<Json<bool>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        staff_id = id,
        "Setting staff password"
    );

    accounts::set_staff_password(state.pool(), id, &payload.password).await?;
    Ok(Json(true))
}

async fn to_detail(state: &ServerState, member: Staff) -> AppResult<StaffDetail> {
    let username = match member.credential_id {
        Some(credential_id) => credential::find_by_id(state.pool(), credential_id)
            .await?
            .map(|c| c.username),
        None => None,
    };
    let role_name = role::find_by_id(state.pool(), member.role_id)
        .await?
        .map(|r| r.name)
        .unwrap_or_default();

    Ok(StaffDetail {
        staff: member,
        username,
        role_name,
    })
}

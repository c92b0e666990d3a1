//! Role API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::permissions::{ALL_PERMISSIONS, is_valid_permission};
use crate::core::ServerState;
use crate::db::repository::role;
use shared::error::{AppError, AppResult};
use shared::models::{Role, RoleCreate, RoleUpdate};

/// An operator can only grant permissions they hold themselves
fn validate_permission_ceiling(current_user: &CurrentUser, permissions: &[String]) -> AppResult<()> {
    for perm in permissions {
        if !is_valid_permission(perm) {
            return Err(AppError::validation(format!("Unknown permission: {perm}")));
        }
        if !current_user.has_permission(perm) {
            return Err(AppError::forbidden(format!(
                "Cannot grant permission '{perm}': you do not have it yourself"
            )));
        }
    }
    Ok(())
}

/// Query filter for role listing
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    /// When true, include inactive roles
    all: Option<bool>,
}

/// GET /api/roles - List roles
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<Vec<Role>>> {
    let roles = if query.all.unwrap_or(false) {
        role::find_all_with_inactive(state.pool()).await
    } else {
        role::find_all(state.pool()).await
    }?;

    Ok(Json(roles))
}

/// GET /api/roles/{id} - Get role by ID
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Role>> {
    let role = role::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {} not found", id)))?;

    Ok(Json(role))
}

/// POST /api/roles - Create a new role
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<RoleCreate>,
) -> AppResult<Json<Role>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        role_name = %payload.name,
        "Creating role"
    );

    validate_permission_ceiling(&current_user, &payload.permissions)?;

    let role = role::create(state.pool(), payload).await?;
    Ok(Json(role))
}

/// PUT /api/roles/{id} - Update a role
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        role_id = id,
        "Updating role"
    );

    if let Some(ref permissions) = payload.permissions {
        validate_permission_ceiling(&current_user, permissions)?;
    }

    let role = role::update(state.pool(), id, payload).await?;
    Ok(Json(role))
}

/// DELETE /api/roles/{id} - Delete a role
///
/// System roles and roles still assigned to staff are refused.
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    tracing::info!(
        user_id = current_user.id,
        username = %current_user.username,
        role_id = id,
        "Deleting role"
    );

    let deleted = role::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

/// GET /api/permissions - List all grantable permissions
pub async fn list_permissions() -> Json<Vec<String>> {
    let permissions: Vec<String> = ALL_PERMISSIONS.iter().map(|s| s.to_string()).collect();
    Json(permissions)
}

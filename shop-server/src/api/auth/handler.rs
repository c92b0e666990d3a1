//! Authentication Handlers
//!
//! Handles login, logout, and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State};

use crate::accounts::password;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{credential, now_ts, role};
use crate::security_log;
use shared::error::{AppError, AppResult};

use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Login handler
///
/// Authenticates credentials and returns a JWT token. The error message
/// is uniform for unknown usernames, wrong passwords and locked
/// accounts, and a fixed delay masks the lookup timing.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Locked accounts get the same answer as bad passwords
    if state.login_throttle.is_locked(&req.username) {
        security_log!(
            "WARN",
            "login_locked",
            username = req.username.clone()
        );
        return Err(AppError::invalid_credentials());
    }

    let auth = credential::find_auth_by_username(state.pool(), &req.username).await?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(state.config.auth_fixed_delay_ms)).await;

    let auth = match auth {
        Some(auth) => {
            if !auth.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            if !password::verify_password(&auth.password_hash, &req.password) {
                state.login_throttle.record_failure(&req.username);
                tracing::warn!(username = %req.username, "Login failed, invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            auth
        }
        None => {
            state.login_throttle.record_failure(&req.username);
            tracing::warn!(username = %req.username, "Login failed, unknown username");
            return Err(AppError::invalid_credentials());
        }
    };

    // Role comes from group membership; the sync keeps it at exactly one
    let role = resolve_role(&state, auth.id).await?;
    if !role.is_active {
        return Err(AppError::forbidden("Role has been disabled"));
    }

    let token = state.get_jwt_service().generate_token(
        auth.id,
        &auth.username,
        &role.name,
        &role.permissions,
    )?;

    state.login_throttle.clear(&req.username);
    credential::touch_last_login(state.pool(), auth.id, now_ts()).await?;

    let profile = credential::find_by_id(state.pool(), auth.id)
        .await?
        .ok_or_else(|| AppError::internal("Credential row missing after login"))?;

    tracing::info!(
        credential_id = auth.id,
        username = %auth.username,
        role = %role.name,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: auth.id,
            username: auth.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role_id: role.id,
            role_name: role.name,
            permissions: role.permissions,
            is_active: profile.is_active,
        },
    }))
}

/// Get current user info, re-read from the database so role changes
/// made after the token was issued show up immediately
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    let profile = credential::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(AppError::unauthorized)?;
    let role = resolve_role(&state, user.id).await?;

    Ok(Json(UserInfo {
        id: profile.id,
        username: profile.username,
        first_name: profile.first_name,
        last_name: profile.last_name,
        role_id: role.id,
        role_name: role.name,
        permissions: role.permissions,
        is_active: profile.is_active,
    }))
}

/// Logout handler
///
/// Tokens are stateless, so this only records the event.
pub async fn logout(user: CurrentUser) -> AppResult<Json<bool>> {
    tracing::info!(
        credential_id = user.id,
        username = %user.username,
        "User logged out"
    );
    Ok(Json(true))
}

async fn resolve_role(state: &ServerState, credential_id: i64) -> AppResult<shared::models::Role> {
    let role_ids = credential::group_role_ids(state.pool(), credential_id).await?;
    let role_id = role_ids
        .first()
        .copied()
        .ok_or_else(|| AppError::forbidden("Account has no role assigned"))?;
    role::find_by_id(state.pool(), role_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Role {role_id} missing for credential")))
}

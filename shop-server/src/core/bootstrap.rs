//! First-run seeding
//!
//! Runs at every startup and inserts only what is missing, so it is
//! safe against restarts. Seeds the default roles and, when a password
//! is configured, the `admin` credential.

use crate::accounts::password;
use crate::auth::permissions;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{RepoError, credential, now_ts, role};
use shared::error::{AppError, AppResult};
use sqlx::SqlitePool;

const DEFAULT_ROLES: &[(&str, &str, bool)] = &[
    ("admin", "System administration", true),
    ("owner", "Shop owner", false),
    ("assistant-manager", "Assistant manager", false),
    ("employee", "Sales floor staff", false),
];

pub async fn seed(db: &DbService, config: &Config) -> AppResult<()> {
    for (name, description, is_system) in DEFAULT_ROLES {
        if role::find_by_name(&db.pool, name).await?.is_none() {
            let permissions = permissions::get_default_permissions(name);
            insert_role(&db.pool, name, description, &permissions, *is_system).await?;
            tracing::info!(role = name, "Seeded default role");
        }
    }

    seed_admin_credential(db, config).await
}

async fn insert_role(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    permissions: &[String],
    is_system: bool,
) -> AppResult<()> {
    let permissions_json =
        serde_json::to_string(permissions).unwrap_or_else(|_| "[]".to_string());
    sqlx::query("INSERT INTO role (name, description, permissions, is_system) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(description)
        .bind(&permissions_json)
        .bind(is_system)
        .execute(pool)
        .await
        .map_err(RepoError::from)?;
    Ok(())
}

/// Create the `admin` login unless it already exists
///
/// The password comes from `ADMIN_PASSWORD`; development builds fall
/// back to a fixed one so a fresh checkout is usable immediately.
async fn seed_admin_credential(db: &DbService, config: &Config) -> AppResult<()> {
    if credential::find_by_username(&db.pool, "admin")
        .await?
        .is_some()
    {
        return Ok(());
    }

    let Some(admin_password) = admin_password(config) else {
        tracing::warn!("ADMIN_PASSWORD not set, admin credential not seeded");
        return Ok(());
    };
    password::validate_password(&admin_password)?;

    let admin_role = role::find_by_name(&db.pool, "admin")
        .await?
        .ok_or_else(|| AppError::internal("Admin role missing after seeding"))?;
    let password_hash = password::hash_password(&admin_password)?;

    let mut tx = db.pool.begin().await.map_err(RepoError::from)?;
    let credential_id = credential::insert(
        &mut *tx,
        "admin",
        &password_hash,
        "System",
        "Administrator",
        "",
        now_ts(),
    )
    .await?;
    credential::replace_groups(&mut tx, credential_id, admin_role.id).await?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!("Seeded admin credential");
    Ok(())
}

fn admin_password(config: &Config) -> Option<String> {
    config.admin_password.clone().or_else(|| {
        config
            .is_development()
            .then(|| "admin-dev-password".to_string())
    })
}

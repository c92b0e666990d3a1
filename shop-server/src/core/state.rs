use std::sync::Arc;

use dashmap::DashMap;
use shared::error::AppResult;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, bootstrap};
use crate::db::DbService;

const MAX_FAILED_LOGINS: u32 = 5;
const LOCKOUT_SECS: i64 = 900;

/// Per-username failed login tracker
///
/// After [`MAX_FAILED_LOGINS`] consecutive failures a username is
/// locked for [`LOCKOUT_SECS`]. Successful logins clear the counter.
#[derive(Debug, Default)]
pub struct LoginThrottle {
    failures: DashMap<String, (u32, i64)>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self {
            failures: DashMap::new(),
        }
    }

    pub fn is_locked(&self, username: &str) -> bool {
        match self.failures.get(username) {
            Some(entry) => {
                let (count, last_failure) = *entry;
                count >= MAX_FAILED_LOGINS
                    && chrono::Utc::now().timestamp() - last_failure < LOCKOUT_SECS
            }
            None => false,
        }
    }

    pub fn record_failure(&self, username: &str) {
        let now = chrono::Utc::now().timestamp();
        let mut entry = self.failures.entry(username.to_string()).or_insert((0, now));
        let (count, last_failure) = *entry;
        // A stale streak starts over
        if now - last_failure >= LOCKOUT_SECS {
            *entry = (1, now);
        } else {
            *entry = (count + 1, now);
        }
    }

    pub fn clear(&self, username: &str) {
        self.failures.remove(username);
    }
}

/// Shared server state handed to every handler
///
/// Cloning is cheap: the pool and services are reference-counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub login_throttle: Arc<LoginThrottle>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Creates the work directory, opens the database, runs pending
    /// migrations and seeds the default roles and admin credential.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir().map_err(|e| {
            shared::error::AppError::with_message(
                shared::error::ErrorCode::ConfigError,
                format!("Failed to create work directory {}: {e}", config.work_dir),
            )
        })?;

        let db = DbService::new(&config.database_file()).await?;
        bootstrap::seed(&db, config).await?;

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            login_throttle: Arc::new(LoginThrottle::new()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_locks_after_repeated_failures() {
        let throttle = LoginThrottle::new();
        for _ in 0..MAX_FAILED_LOGINS {
            throttle.record_failure("jane.doe");
        }
        assert!(throttle.is_locked("jane.doe"));
        assert!(!throttle.is_locked("someone.else"));
    }

    #[test]
    fn test_throttle_clears_on_success() {
        let throttle = LoginThrottle::new();
        for _ in 0..MAX_FAILED_LOGINS {
            throttle.record_failure("jane.doe");
        }
        throttle.clear("jane.doe");
        assert!(!throttle.is_locked("jane.doe"));
    }

    #[test]
    fn test_throttle_below_limit_is_open() {
        let throttle = LoginThrottle::new();
        throttle.record_failure("jane.doe");
        throttle.record_failure("jane.doe");
        assert!(!throttle.is_locked("jane.doe"));
    }
}

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | SHOP_WORK_DIR | ./data | Work directory for database and logs |
/// | DATABASE_PATH | <work_dir>/shop.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_PASSWORD | (unset) | Password for the seeded admin login |
/// | AUTH_FIXED_DELAY_MS | 500 | Fixed delay on failed logins |
/// | LOG_DIR | (unset) | Enables daily rolling file logs |
/// | JWT_SECRET | (unset) | Token signing secret, required in production |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
///
/// # Example
///
/// ```ignore
/// SHOP_WORK_DIR=/var/lib/bookshop HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and log files
    pub work_dir: String,
    /// Explicit database file path, overrides the work_dir default
    pub database_path: Option<String>,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Password for the seeded `admin` credential
    pub admin_password: Option<String>,
    /// Fixed delay applied to failed login attempts, in milliseconds
    pub auth_fixed_delay_ms: u64,
    /// Log directory, file logging is disabled when unset
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("SHOP_WORK_DIR").unwrap_or_else(|_| "./data".into()),
            database_path: std::env::var("DATABASE_PATH").ok(),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            auth_fixed_delay_ms: std::env::var("AUTH_FIXED_DELAY_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(500),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Resolved database file path
    pub fn database_file(&self) -> String {
        match &self.database_path {
            Some(path) => path.clone(),
            None => PathBuf::from(&self.work_dir)
                .join("shop.db")
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// Create the work directory if it does not exist
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

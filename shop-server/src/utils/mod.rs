//! Utility Module
//!
//! Logging setup and process environment bootstrap.

pub mod logger;

use crate::core::Config;

/// Prepare the process environment: load `.env`, then initialize
/// logging from the resulting configuration.
///
/// Call once, before anything logs.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if config.is_production() {
            "info".into()
        } else {
            "debug".into()
        }
    });

    logger::init_logger_with_file(&level, config.is_production(), config.log_dir.as_deref())
}

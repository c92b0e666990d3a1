//! Bookshop Server - inventory and sales management for a used bookshop
//!
//! # Architecture overview
//!
//! - **Accounts** (`accounts`): staff profiles with synchronized login
//!   credentials (username generation, password policy, role binding)
//! - **Orders** (`orders`): order totals and the one-way completion
//!   lifecycle
//! - **Auth** (`auth`): JWT + Argon2 authentication and permissions
//! - **HTTP API** (`api`): RESTful routes and handlers
//! - **Database** (`db`): embedded SQLite storage via sqlx
//!
//! # Module layout
//!
//! ```text
//! shop-server/src/
//! ├── core/          # configuration, state, server, bootstrap
//! ├── auth/          # JWT authentication, permissions
//! ├── accounts/      # staff/credential synchronization
//! ├── orders/        # order totals and completion
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # logging, environment setup
//! └── db/            # database layer and repositories
//! ```

pub mod accounts;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use utils::setup_environment;

// Security logging macro - events land in the dedicated security log
// via `target: "security"` (see utils::logger)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _____ __
   / __ )____  ____  / /__/ ___// /_  ____  ____
  / __  / __ \/ __ \/ //_/\__ \/ __ \/ __ \/ __ \
 / /_/ / /_/ / /_/ / ,<  ___/ / / / / /_/ / /_/ /
/_____/\____/\____/_/|_|/____/_/ /_/\____/ .___/
                                        /_/
    "#
    );
}

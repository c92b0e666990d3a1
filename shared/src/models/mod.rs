//! Data models
//!
//! Shared between shop-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod author;
pub mod book;
pub mod credential;
pub mod customer;
pub mod order;
pub mod report;
pub mod role;
pub mod staff;

// Re-exports
pub use author::*;
pub use book::*;
pub use credential::*;
pub use customer::*;
pub use order::*;
pub use report::*;
pub use role::*;
pub use staff::*;

//! Shared types for the bookshop back office
//!
//! Common types used across server and clients: data models, the unified
//! error system, and API request/response structures.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

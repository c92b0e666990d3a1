//! Unified error handling
//!
//! One error code table shared by the server and API clients, with
//! category and HTTP status derived from the code.

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};

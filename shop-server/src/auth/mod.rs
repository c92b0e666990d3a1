//! Authentication and authorization
//!
//! - [`JwtService`] token generation and validation
//! - [`CurrentUser`] request user context
//! - [`require_auth`] / [`require_permission`] middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};

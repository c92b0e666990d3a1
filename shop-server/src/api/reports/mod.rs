//! Sales Report Routes

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Report router; all reports require `reports:view`
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/staff/{id}/sales", get(handler::staff_sales))
        .layer(middleware::from_fn(require_permission("reports:view")))
}

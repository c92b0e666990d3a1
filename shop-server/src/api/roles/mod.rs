//! Role API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Role router
///
/// Reads are open to any authenticated user; mutations and the
/// permission catalog require `roles:manage`.
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().nest("/api/roles", read_routes());

    let manage_routes = Router::new()
        .nest("/api/roles", manage_routes())
        .route("/api/permissions", get(handler::list_permissions))
        .layer(middleware::from_fn(require_permission("roles:manage")));

    read_routes.merge(manage_routes)
}

fn read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn manage_routes() -> Router<ServerState> {
    Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
}

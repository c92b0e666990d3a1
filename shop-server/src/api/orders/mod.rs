//! Order API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Order router
///
/// Any authenticated user can browse and build orders. Completing an
/// order requires `orders:complete`, deleting one requires
/// `orders:delete`.
pub fn router() -> Router<ServerState> {
    let open_routes = Router::new().nest("/api/orders", open_routes());

    let complete_routes = Router::new()
        .route("/api/orders/{id}/complete", post(handler::complete))
        .layer(middleware::from_fn(require_permission("orders:complete")));

    let delete_routes = Router::new()
        .route("/api/orders/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission("orders:delete")));

    open_routes.merge(complete_routes).merge(delete_routes)
}

fn open_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/recompute", post(handler::recompute_total))
}

//! Author API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Author router; mutations require `authors:manage`
pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().nest("/api/authors", read_routes());

    let manage_routes = Router::new()
        .nest("/api/authors", manage_routes())
        .layer(middleware::from_fn(require_permission("authors:manage")));

    read_routes.merge(manage_routes)
}

fn read_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}

fn manage_routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create)).route(
        "/{id}",
        axum::routing::put(handler::update).delete(handler::delete),
    )
}

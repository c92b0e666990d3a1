//! API routes
//!
//! # Structure
//!
//! - [`health`] liveness probe, public
//! - [`auth`] login and session info
//! - [`roles`] role management
//! - [`staff`] staff profiles, credential sync, passwords
//! - [`authors`] author catalog
//! - [`books`] book catalog
//! - [`customers`] customer records
//! - [`orders`] order lifecycle
//! - [`reports`] sales reporting

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod auth;
pub mod authors;
pub mod books;
pub mod customers;
pub mod health;
pub mod logging;
pub mod orders;
pub mod reports;
pub mod roles;
pub mod staff;

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered, no middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(roles::router())
        .merge(staff::router())
        .merge(authors::router())
        .merge(books::router())
        .merge(customers::router())
        .merge(orders::router())
        .merge(reports::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .with_state(state)
}

//! HTTP application wiring (Axum router).
//!
//! - `routes/`: handlers, one file per area (session, views, navigation)
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use axum::Router;

use crate::context::AppState;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Public routes (entry page, login/logout, session, health) are not guarded;
/// everything from the capability table plus the navigation endpoints is.
pub fn build_app(state: AppState) -> Router {
    let guarded = routes::guarded_router(&state).route_layer(
        axum::middleware::from_fn_with_state(state.clone(), middleware::guard_middleware),
    );

    Router::new()
        .merge(routes::public_router())
        .merge(guarded)
        .fallback(routes::system::not_found)
        .with_state(state)
}

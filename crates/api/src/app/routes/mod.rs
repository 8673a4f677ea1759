use axum::{
    Router,
    routing::{get, post},
};

use crate::context::AppState;

pub mod navigation;
pub mod session;
pub mod system;
pub mod views;

/// Routes reachable without a session.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::entry))
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/session", get(session::current))
        .route("/health", get(system::health))
}

/// One view per capability-table route, plus the navigation endpoints.
///
/// Callers must wrap this in the guard middleware.
pub fn guarded_router(state: &AppState) -> Router<AppState> {
    let entry = state.guard.entry_route();
    let mut router = Router::new()
        .route("/navigation", get(navigation::menu))
        .route("/access", get(navigation::access));

    for capability in state.guard.table().routes().filter(|c| c.path != entry) {
        router = router.route(&capability.path, get(views::render));
    }
    router
}

//! Entry page, demo login, logout and the session accessor.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use tenanthr_auth::{Role, SessionSnapshot};

use crate::app::dto::{EntryResponse, LoginRequest, RoleOption};
use crate::app::errors;
use crate::context::AppState;

/// GET / - public entry point with the login role options.
pub async fn entry(State(state): State<AppState>) -> Json<EntryResponse> {
    Json(EntryResponse {
        app: "TenantHR",
        roles: Role::ALL.into_iter().map(RoleOption::from).collect(),
        authenticated: state.snapshot().is_authenticated(),
    })
}

/// POST /login - sign in as the demo account of the selected role.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and password are required",
        );
    }

    let role: Role = match body.role.parse() {
        Ok(role) => role,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e.to_string());
        }
    };

    match state.session.login(role).await {
        Ok(_) => Redirect::to(state.guard.landing_route()).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

/// POST /logout - always ends on the entry page, even if the marker could not
/// be removed.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.session.logout() {
        tracing::debug!(error = %e, "logout completed without clearing the marker");
    }
    Redirect::to(state.guard.entry_route())
}

/// GET /session - current session snapshot.
pub async fn current(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.snapshot())
}

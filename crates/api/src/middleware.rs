use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use tenanthr_auth::GuardDecision;

use crate::context::AppState;

/// Guard every matched route: placeholder while loading, redirect when signed
/// out or forbidden, otherwise run the handler with the view context attached.
pub async fn guard_middleware(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let snapshot = state.session.snapshot();
    let route = req.uri().path().to_string();

    match state.guard.guard(&snapshot, &route) {
        GuardDecision::Placeholder => placeholder(),
        GuardDecision::Redirect(to) => {
            tracing::debug!(%route, %to, "guard redirect");
            Redirect::to(&to).into_response()
        }
        GuardDecision::Render(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
    }
}

/// Neutral "still resolving" response: no content, no `Location`.
fn placeholder() -> Response {
    let mut res = (
        StatusCode::SERVICE_UNAVAILABLE,
        axum::Json(json!({ "state": "resolving" })),
    )
        .into_response();
    let headers = res.headers_mut();
    headers.insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    res
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tenanthr_auth::SessionError;

pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match err {
        SessionError::UnknownRole(role) => json_error(
            StatusCode::BAD_REQUEST,
            "unknown_role",
            format!("no account is available for role '{role}'"),
        ),
        SessionError::Directory(e) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "directory_unavailable", e.to_string())
        }
        SessionError::Marker(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "session_store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

//! Sidebar menu and access explanations for the signed-in principal.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use tenanthr_auth::{AccessExplanation, ViewContext, explain_access};

use crate::app::dto::{AccessQuery, NavItem, NavigationResponse};
use crate::context::AppState;

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { text: "Dashboard", to: "/dashboard" },
    NavItem { text: "Employees", to: "/employees" },
    NavItem { text: "Attendance", to: "/attendance" },
    NavItem { text: "Leaves", to: "/leaves" },
    NavItem { text: "Payroll", to: "/payroll" },
    NavItem { text: "Reports", to: "/reports" },
    NavItem { text: "Benefits", to: "/benefits" },
    NavItem { text: "Organization", to: "/organization" },
    NavItem { text: "Settings", to: "/settings" },
];

/// GET /navigation - menu entries the current role can actually open.
pub async fn menu(
    State(state): State<AppState>,
    Extension(ctx): Extension<ViewContext>,
) -> Json<NavigationResponse> {
    let table = state.guard.table();
    let items = NAV_ITEMS
        .iter()
        .filter(|item| table.is_role_allowed(item.to, ctx.role))
        .copied()
        .collect();

    Json(NavigationResponse {
        role: ctx.role,
        items,
    })
}

/// GET /access?route=... - why the guard would render or redirect `route`.
pub async fn access(
    State(state): State<AppState>,
    Query(query): Query<AccessQuery>,
) -> Json<AccessExplanation> {
    Json(explain_access(
        state.guard.table(),
        &state.snapshot(),
        &query.route,
    ))
}

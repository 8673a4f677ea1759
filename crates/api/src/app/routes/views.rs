//! Stand-ins for the HR view screens. Each one echoes the read-only context
//! the guard handed it.

use axum::{Extension, Json};

use tenanthr_auth::ViewContext;

use crate::app::dto::ViewResponse;

pub async fn render(Extension(ctx): Extension<ViewContext>) -> Json<ViewResponse> {
    Json(ViewResponse {
        title: title_for(&ctx.route),
        context: ctx,
    })
}

fn title_for(route: &str) -> &'static str {
    match route {
        "/dashboard" => "Dashboard",
        "/profile" => "Profile",
        "/employees" => "Employees",
        "/attendance" => "Attendance",
        "/leaves" => "Leave Management",
        "/payroll" => "Payroll",
        "/reports" => "Reports",
        "/benefits" => "Benefits",
        "/organization" => "Organization",
        "/settings" => "Settings",
        "/tenants" => "Tenants",
        "/employee/leaves" => "My Leave Requests",
        "/employee/attendance" => "My Attendance",
        "/employee/payslips" => "My Payslips",
        "/employee/documents" => "My Documents",
        _ => "TenantHR",
    }
}

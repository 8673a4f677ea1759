use serde::{Deserialize, Serialize};

use tenanthr_auth::{Role, ViewContext};

// -------------------------
// Request DTOs
// -------------------------

/// Demo login form. Credentials are required but not verified; the selected
/// role decides which demo account signs in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    pub route: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub value: Role,
    pub label: &'static str,
}

impl From<Role> for RoleOption {
    fn from(role: Role) -> Self {
        Self {
            value: role,
            label: role.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub app: &'static str,
    pub roles: Vec<RoleOption>,
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavItem {
    pub text: &'static str,
    pub to: &'static str,
}

/// Stand-in for a view screen: the title plus the context it was handed.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub title: &'static str,
    #[serde(flatten)]
    pub context: ViewContext,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub role: Role,
    pub items: Vec<NavItem>,
}

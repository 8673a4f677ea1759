//! Role-Capability Table: which roles may open which routes.
//!
//! The table is plain data, built once and never mutated. Role sets are
//! disjunctive and there is no role hierarchy: a super-admin reaches a
//! restricted route only when the route lists `super-admin`.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::{Role, RoleSet};

/// What a registered route requires beyond authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Any authenticated principal.
    Open,
    /// Principal's role must be one of these (never empty).
    Restricted(RoleSet),
}

impl RouteRequirement {
    /// Empty role sets mean "no role restriction".
    pub fn from_roles(roles: RoleSet) -> Self {
        if roles.is_empty() {
            RouteRequirement::Open
        } else {
            RouteRequirement::Restricted(roles)
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        match self {
            RouteRequirement::Open => true,
            RouteRequirement::Restricted(roles) => roles.contains(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCapability {
    pub path: String,
    pub requirement: RouteRequirement,
}

/// Result of looking a route up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityLookup<'a> {
    Restricted(&'a RoleSet),
    Open,
    /// Not in the table; the guard treats it as authenticated-only.
    Unregistered,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("invalid route path '{0}': must start with '/'")]
    InvalidPath(String),

    #[error("route '{0}' registered more than once")]
    DuplicateRoute(String),
}

/// Normalize a navigation target to its table key.
///
/// Drops any query string or fragment and a trailing `/` (except for the root).
pub fn normalize_route(route: &str) -> &str {
    let end = route.find(['?', '#']).unwrap_or(route.len());
    let path = &route[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    entries: Vec<RouteCapability>,
    index: HashMap<String, usize>,
}

/// HRMS route table: `(path, roles)`, empty roles meaning open.
const HRMS_ROUTES: &[(&str, &[Role])] = &[
    ("/dashboard", &[]),
    ("/profile", &[]),
    ("/employees", &[Role::Hr, Role::OrgAdmin, Role::SuperAdmin]),
    ("/attendance", &[Role::Hr, Role::OrgAdmin, Role::SuperAdmin]),
    ("/leaves", &[Role::Hr, Role::OrgAdmin, Role::SuperAdmin]),
    ("/payroll", &[Role::Accounts, Role::OrgAdmin, Role::SuperAdmin]),
    ("/reports", &[Role::Hr, Role::Accounts, Role::OrgAdmin, Role::SuperAdmin]),
    ("/benefits", &[Role::Hr, Role::OrgAdmin, Role::SuperAdmin]),
    ("/organization", &[Role::OrgAdmin, Role::SuperAdmin]),
    ("/settings", &[]),
    ("/tenants", &[Role::SuperAdmin]),
    ("/employee/leaves", &[]),
    ("/employee/attendance", &[]),
    ("/employee/payslips", &[]),
    ("/employee/documents", &[]),
];

impl CapabilityTable {
    pub fn builder() -> CapabilityTableBuilder {
        CapabilityTableBuilder::default()
    }

    /// The HRMS route table served by the TenantHR shell.
    pub fn hrms() -> Self {
        let mut table = Self::default();
        for (path, roles) in HRMS_ROUTES {
            table.push(
                path.to_string(),
                RouteRequirement::from_roles(roles.iter().copied().collect()),
            );
        }
        table
    }

    fn push(&mut self, path: String, requirement: RouteRequirement) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push(RouteCapability { path, requirement });
    }

    pub fn lookup(&self, route: &str) -> CapabilityLookup<'_> {
        match self.get(route).map(|c| &c.requirement) {
            Some(RouteRequirement::Restricted(roles)) => CapabilityLookup::Restricted(roles),
            Some(RouteRequirement::Open) => CapabilityLookup::Open,
            None => CapabilityLookup::Unregistered,
        }
    }

    pub fn get(&self, route: &str) -> Option<&RouteCapability> {
        self.index
            .get(normalize_route(route))
            .map(|&i| &self.entries[i])
    }

    /// Whether `role` may open `route`.
    ///
    /// Unregistered routes only require authentication, so any role passes.
    pub fn is_role_allowed(&self, route: &str, role: Role) -> bool {
        match self.lookup(route) {
            CapabilityLookup::Restricted(roles) => roles.contains(role),
            CapabilityLookup::Open | CapabilityLookup::Unregistered => true,
        }
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteCapability> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CapabilityTableBuilder {
    entries: Vec<(String, RouteRequirement)>,
}

impl CapabilityTableBuilder {
    /// Register a route any authenticated principal may open.
    pub fn open(mut self, path: impl Into<String>) -> Self {
        self.entries.push((path.into(), RouteRequirement::Open));
        self
    }

    /// Register a route restricted to `roles` (empty means open).
    pub fn restricted(mut self, path: impl Into<String>, roles: impl Into<RoleSet>) -> Self {
        self.entries
            .push((path.into(), RouteRequirement::from_roles(roles.into())));
        self
    }

    pub fn build(self) -> Result<CapabilityTable, CapabilityError> {
        let mut table = CapabilityTable::default();
        for (path, requirement) in self.entries {
            if !path.starts_with('/') {
                return Err(CapabilityError::InvalidPath(path));
            }
            let key = normalize_route(&path).to_string();
            if key != path {
                return Err(CapabilityError::InvalidPath(path));
            }
            if table.index.contains_key(&key) {
                return Err(CapabilityError::DuplicateRoute(key));
            }
            table.push(key, requirement);
        }
        Ok(table)
    }
}

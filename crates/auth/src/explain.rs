//! Access explanations (audit trail for guard decisions).

use serde::Serialize;

use crate::capabilities::normalize_route;
use crate::{CapabilityLookup, CapabilityTable, Role, SessionSnapshot};

/// Detailed explanation of a route access decision.
///
/// Answers "why was I sent back to the dashboard?" without re-deriving the
/// capability table by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub route: String,
    pub requirement: RequirementKind,
    pub outcome: AccessOutcome,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub role: Option<Role>,
    /// Roles that would be let in (all roles for open/unregistered routes).
    pub granted_roles: Vec<Role>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Restricted,
    Open,
    Unregistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    Resolving,
    Unauthenticated,
    Forbidden,
    Authorized,
}

/// Explain how the guard treats `route` for the session in `snapshot`.
pub fn explain_access(
    table: &CapabilityTable,
    snapshot: &SessionSnapshot,
    route: &str,
) -> AccessExplanation {
    let route = normalize_route(route).to_string();
    let (requirement, granted_roles) = match table.lookup(&route) {
        CapabilityLookup::Restricted(roles) => {
            (RequirementKind::Restricted, roles.iter().collect())
        }
        CapabilityLookup::Open => (RequirementKind::Open, Role::ALL.to_vec()),
        CapabilityLookup::Unregistered => (RequirementKind::Unregistered, Role::ALL.to_vec()),
    };
    let role = snapshot.role();

    let (outcome, reason, suggestions) = if snapshot.is_loading {
        (
            AccessOutcome::Resolving,
            "Session is still loading; no decision is final yet".to_string(),
            vec!["Retry once the session has been resolved".to_string()],
        )
    } else {
        match role {
            None => (
                AccessOutcome::Unauthenticated,
                format!("Nobody is signed in; '{route}' requires authentication"),
                vec!["Sign in from the public entry page".to_string()],
            ),
            Some(role) if granted_roles.contains(&role) => {
                let reason = match requirement {
                    RequirementKind::Restricted => {
                        format!("Role '{role}' is listed for '{route}'")
                    }
                    RequirementKind::Open => {
                        format!("'{route}' is open to every authenticated role")
                    }
                    RequirementKind::Unregistered => format!(
                        "'{route}' is not in the capability table; authentication is enough"
                    ),
                };
                (AccessOutcome::Authorized, reason, Vec::new())
            }
            Some(role) => {
                let names: Vec<&str> = granted_roles.iter().map(|r| r.as_str()).collect();
                (
                    AccessOutcome::Forbidden,
                    format!(
                        "Role '{role}' is not listed for '{route}'. Allowed roles: {names:?}"
                    ),
                    vec![
                        format!("Sign in with one of the roles {names:?}"),
                        format!("Add '{role}' to the capability entry for '{route}'"),
                    ],
                )
            }
        }
    };

    AccessExplanation {
        route,
        requirement,
        outcome,
        reason,
        role,
        granted_roles,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::DemoDirectory;

    fn as_role(role: Role) -> SessionSnapshot {
        let principal = DemoDirectory::demo().unwrap().get(role).cloned().unwrap();
        SessionSnapshot::signed_in(principal, Utc::now())
    }

    #[test]
    fn forbidden_explanation_lists_allowed_roles() {
        let table = CapabilityTable::hrms();
        let ex = explain_access(&table, &as_role(Role::Employee), "/payroll");
        assert_eq!(ex.outcome, AccessOutcome::Forbidden);
        assert_eq!(ex.requirement, RequirementKind::Restricted);
        assert_eq!(ex.granted_roles, vec![Role::Accounts, Role::OrgAdmin, Role::SuperAdmin]);
        assert!(ex.reason.contains("employee"));
        assert_eq!(ex.suggestions.len(), 2);
    }

    #[test]
    fn open_and_unregistered_routes_explain_authorization() {
        let table = CapabilityTable::hrms();
        let open = explain_access(&table, &as_role(Role::Hr), "/settings/");
        assert_eq!(open.route, "/settings");
        assert_eq!(open.outcome, AccessOutcome::Authorized);
        assert_eq!(open.requirement, RequirementKind::Open);

        let miss = explain_access(&table, &as_role(Role::Hr), "/nowhere");
        assert_eq!(miss.outcome, AccessOutcome::Authorized);
        assert_eq!(miss.requirement, RequirementKind::Unregistered);
    }

    #[test]
    fn loading_and_signed_out_sessions() {
        let table = CapabilityTable::hrms();
        let loading = explain_access(&table, &SessionSnapshot::loading(), "/tenants");
        assert_eq!(loading.outcome, AccessOutcome::Resolving);

        let anon = explain_access(&table, &SessionSnapshot::signed_out(), "/tenants");
        assert_eq!(anon.outcome, AccessOutcome::Unauthenticated);
        assert_eq!(anon.role, None);
        assert_eq!(anon.granted_roles, vec![Role::SuperAdmin]);
    }

    #[test]
    fn serializes_with_snake_case_tags() {
        let table = CapabilityTable::hrms();
        let ex = explain_access(&table, &as_role(Role::SuperAdmin), "/tenants");
        let json = serde_json::to_value(&ex).unwrap();
        assert_eq!(json["outcome"], "authorized");
        assert_eq!(json["requirement"], "restricted");
        assert_eq!(json["role"], "super-admin");
    }
}

//! Route Guard: decides render vs. redirect for a protected route.
//!
//! States:
//! - `Resolving`: the session is still loading. Render a neutral placeholder,
//!   never protected content and never a redirect.
//! - `Unauthenticated`: no principal. Redirect to the public entry route.
//! - `Forbidden`: principal present, role not permitted. Redirect to the
//!   landing route (never back to the attempted route).
//! - `Authorized`: render the view with a read-only [`ViewContext`].
//!
//! Evaluation is a pure function of a [`SessionSnapshot`] and the capability
//! table; it never fails and never panics.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::capabilities::normalize_route;
use crate::{CapabilityLookup, CapabilityTable, Principal, Role, RoleSet, SessionSnapshot};

pub const DEFAULT_ENTRY_ROUTE: &str = "/";
pub const DEFAULT_LANDING_ROUTE: &str = "/dashboard";

/// What an authorized view receives. A copy: views cannot touch the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub route: String,
    pub principal: Principal,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Resolving,
    Unauthenticated,
    Forbidden { route: String, role: Role },
    Authorized(ViewContext),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Placeholder,
    Redirect(String),
    Render(ViewContext),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: Arc<CapabilityTable>,
    entry_route: String,
    landing_route: String,
}

impl RouteGuard {
    /// Guard with `/` as the public entry and `/dashboard` as the landing route.
    pub fn new(table: Arc<CapabilityTable>) -> Self {
        Self::with_routes(table, DEFAULT_ENTRY_ROUTE, DEFAULT_LANDING_ROUTE)
    }

    pub fn with_routes(
        table: Arc<CapabilityTable>,
        entry_route: impl Into<String>,
        landing_route: impl Into<String>,
    ) -> Self {
        Self {
            table,
            entry_route: entry_route.into(),
            landing_route: landing_route.into(),
        }
    }

    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    pub fn entry_route(&self) -> &str {
        &self.entry_route
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Evaluate `route` against the capability table.
    pub fn evaluate(&self, snapshot: &SessionSnapshot, route: &str) -> GuardState {
        let required = match self.table.lookup(route) {
            CapabilityLookup::Restricted(roles) => Some(roles),
            CapabilityLookup::Open => None,
            CapabilityLookup::Unregistered => {
                debug!(route, "route not in capability table; requiring authentication only");
                None
            }
        };
        self.check(snapshot, route, required)
    }

    /// Evaluate with an explicit role requirement instead of the table entry.
    ///
    /// An empty set means any authenticated principal.
    pub fn evaluate_with(
        &self,
        snapshot: &SessionSnapshot,
        route: &str,
        required_roles: &RoleSet,
    ) -> GuardState {
        let required = (!required_roles.is_empty()).then_some(required_roles);
        self.check(snapshot, route, required)
    }

    fn check(
        &self,
        snapshot: &SessionSnapshot,
        route: &str,
        required: Option<&RoleSet>,
    ) -> GuardState {
        if snapshot.is_loading {
            return GuardState::Resolving;
        }

        let Some(principal) = &snapshot.principal else {
            return GuardState::Unauthenticated;
        };

        let route = normalize_route(route).to_string();
        match required {
            Some(roles) if !roles.contains(principal.role) => {
                warn!(
                    %route,
                    role = %principal.role,
                    required = %roles,
                    principal_id = %principal.id,
                    "navigation forbidden for role"
                );
                GuardState::Forbidden {
                    route,
                    role: principal.role,
                }
            }
            _ => GuardState::Authorized(ViewContext {
                route,
                principal: principal.clone(),
                role: principal.role,
            }),
        }
    }

    /// Map a guard state to what the navigation layer should do.
    pub fn decide(&self, state: GuardState) -> GuardDecision {
        match state {
            GuardState::Resolving => GuardDecision::Placeholder,
            GuardState::Unauthenticated => GuardDecision::Redirect(self.entry_route.clone()),
            // A forbidden landing route would redirect onto itself.
            GuardState::Forbidden { route, .. } if route == self.landing_route => {
                GuardDecision::Redirect(self.entry_route.clone())
            }
            GuardState::Forbidden { .. } => GuardDecision::Redirect(self.landing_route.clone()),
            GuardState::Authorized(ctx) => GuardDecision::Render(ctx),
        }
    }

    /// `evaluate` followed by `decide`.
    pub fn guard(&self, snapshot: &SessionSnapshot, route: &str) -> GuardDecision {
        self.decide(self.evaluate(snapshot, route))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::DemoDirectory;

    fn guard() -> RouteGuard {
        RouteGuard::new(Arc::new(CapabilityTable::hrms()))
    }

    fn as_role(role: Role) -> SessionSnapshot {
        let principal = DemoDirectory::demo().unwrap().get(role).cloned().unwrap();
        SessionSnapshot::signed_in(principal, Utc::now())
    }

    fn redirect(to: &str) -> GuardDecision {
        GuardDecision::Redirect(to.to_string())
    }

    #[test]
    fn scenario_a_employee_is_sent_to_dashboard_from_employees() {
        assert_eq!(guard().guard(&as_role(Role::Employee), "/employees"), redirect("/dashboard"));
    }

    #[test]
    fn scenario_b_super_admin_opens_tenants() {
        let decision = guard().guard(&as_role(Role::SuperAdmin), "/tenants");
        let GuardDecision::Render(ctx) = decision else {
            panic!("expected render, got {decision:?}");
        };
        assert_eq!(ctx.role, Role::SuperAdmin);
        assert_eq!(ctx.route, "/tenants");
        assert_eq!(ctx.principal.name, "Robert Super");
    }

    #[test]
    fn scenario_c_anonymous_payroll_goes_to_entry() {
        assert_eq!(guard().guard(&SessionSnapshot::signed_out(), "/payroll"), redirect("/"));
    }

    #[test]
    fn scenario_d_org_admin_opens_open_settings() {
        assert!(matches!(
            guard().guard(&as_role(Role::OrgAdmin), "/settings"),
            GuardDecision::Render(_)
        ));
    }

    #[test]
    fn scenario_e_loading_renders_placeholder_for_every_route() {
        let g = guard();
        let loading = SessionSnapshot::loading();
        for route in ["/payroll", "/settings", "/unknown", "/"] {
            assert_eq!(g.evaluate(&loading, route), GuardState::Resolving);
            assert_eq!(g.guard(&loading, route), GuardDecision::Placeholder);
        }
    }

    #[test]
    fn loading_wins_even_with_a_principal_present() {
        let mut snapshot = as_role(Role::Hr);
        snapshot.is_loading = true;
        assert_eq!(guard().guard(&snapshot, "/employees"), GuardDecision::Placeholder);
    }

    #[test]
    fn unregistered_routes_require_only_authentication() {
        let g = guard();
        assert_eq!(g.guard(&SessionSnapshot::signed_out(), "/reports/custom"), redirect("/"));
        for role in Role::ALL {
            assert!(matches!(g.guard(&as_role(role), "/reports/custom"), GuardDecision::Render(_)));
        }
    }

    #[test]
    fn explicit_requirement_overrides_table() {
        let g = guard();
        let hr_only = RoleSet::from([Role::Hr]);
        assert!(matches!(
            g.evaluate_with(&as_role(Role::Hr), "/settings", &hr_only),
            GuardState::Authorized(_)
        ));
        assert_eq!(
            g.evaluate_with(&as_role(Role::Accounts), "/settings", &hr_only),
            GuardState::Forbidden { route: "/settings".into(), role: Role::Accounts }
        );
        assert!(matches!(
            g.evaluate_with(&as_role(Role::Accounts), "/settings", &RoleSet::new()),
            GuardState::Authorized(_)
        ));
    }

    #[test]
    fn forbidden_landing_route_does_not_loop() {
        let table = CapabilityTable::builder()
            .restricted("/dashboard", [Role::Hr])
            .build()
            .unwrap();
        let g = RouteGuard::new(Arc::new(table));
        assert_eq!(g.guard(&as_role(Role::Employee), "/dashboard"), redirect("/"));
    }

    #[test]
    fn logout_snapshot_turns_authorized_into_redirect() {
        let g = guard();
        assert!(matches!(g.guard(&as_role(Role::Accounts), "/payroll"), GuardDecision::Render(_)));
        assert_eq!(g.guard(&SessionSnapshot::signed_out(), "/payroll"), redirect("/"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn registered_paths() -> Vec<String> {
            CapabilityTable::hrms().routes().map(|r| r.path.clone()).collect()
        }

        proptest! {
            /// Restricted/open route: render iff the table allows the role,
            /// otherwise redirect to the landing route.
            #[test]
            fn render_iff_role_is_permitted(
                role in prop::sample::select(Role::ALL.to_vec()),
                route in prop::sample::select(registered_paths()),
            ) {
                let g = guard();
                let decision = g.guard(&as_role(role), &route);
                if g.table().is_role_allowed(&route, role) {
                    prop_assert!(
                        matches!(decision, GuardDecision::Render(ref ctx) if ctx.role == role)
                    );
                } else {
                    prop_assert_eq!(decision, redirect("/dashboard"));
                }
            }

            /// Unregistered route: render iff someone is signed in.
            #[test]
            fn unregistered_routes_render_for_any_principal(
                role in prop::sample::select(Role::ALL.to_vec()),
                suffix in "[a-z]{1,12}",
            ) {
                let route = format!("/x-{suffix}");
                let g = guard();
                prop_assert!(matches!(g.guard(&as_role(role), &route), GuardDecision::Render(_)));
                prop_assert_eq!(g.guard(&SessionSnapshot::signed_out(), &route), redirect("/"));
            }

            /// Loading never renders and never redirects.
            #[test]
            fn loading_is_always_a_placeholder(route in "/[a-z/]{0,20}") {
                prop_assert_eq!(
                    guard().guard(&SessionSnapshot::loading(), &route),
                    GuardDecision::Placeholder
                );
            }
        }
    }
}

//! `tenanthr-auth`: session, role-capability table and route guard.
//!
//! This crate is decoupled from HTTP: the navigation layer feeds it a route
//! and a session snapshot and gets back a render/redirect decision.

pub mod capabilities;
pub mod directory;
pub mod explain;
pub mod guard;
pub mod marker;
pub mod principal;
pub mod roles;
pub mod session;

pub use capabilities::{
    CapabilityError, CapabilityLookup, CapabilityTable, RouteCapability, RouteRequirement,
};
pub use directory::{DemoDirectory, DirectoryError, PrincipalDirectory};
pub use explain::{AccessExplanation, AccessOutcome, RequirementKind, explain_access};
pub use guard::{GuardDecision, GuardState, RouteGuard, ViewContext};
pub use marker::{FileMarkerStore, InMemoryMarkerStore, MarkerError, MarkerStore};
pub use principal::Principal;
pub use roles::{Role, RoleParseError, RoleSet};
pub use session::{SessionError, SessionSnapshot, SessionStore};

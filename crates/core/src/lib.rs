//! `tenanthr-core`: identifiers and the domain error model shared by the
//! TenantHR crates.
//!
//! No IO, no async, no HTTP.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrganizationId, PrincipalId};

//! Principal lookup used by login and by session resolution on startup.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use tenanthr_core::{DomainResult, OrganizationId, PrincipalId};

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("principal directory unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the principal that signs in under a role.
///
/// This is the only asynchronous dependency of the session store.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    async fn resolve(&self, role: Role) -> Result<Option<Principal>, DirectoryError>;
}

/// Canned demo accounts, one per role.
#[derive(Debug, Clone, Default)]
pub struct DemoDirectory {
    principals: HashMap<Role, Principal>,
}

impl DemoDirectory {
    /// The five demo accounts of the TechCorp organization plus the platform
    /// administrator (who belongs to no organization).
    pub fn demo() -> DomainResult<Self> {
        let org = OrganizationId::new("1")?;
        let account = |id: &str, name: &str, email: &str, role: Role| -> DomainResult<Principal> {
            Principal::new(PrincipalId::new(id)?, name, email, role)
        };
        let principals = [
            account("1", "John Employee", "john@techcorp.com", Role::Employee)?
                .with_department("Engineering")
                .with_position("Developer")
                .with_organization(org.clone()),
            account("2", "Sarah HR", "sarah@techcorp.com", Role::Hr)?
                .with_department("Human Resources")
                .with_position("HR Manager")
                .with_organization(org.clone()),
            account("3", "Mike Finance", "mike@techcorp.com", Role::Accounts)?
                .with_department("Finance")
                .with_position("Accounts Manager")
                .with_organization(org.clone()),
            account("4", "Jessica Admin", "jessica@techcorp.com", Role::OrgAdmin)?
                .with_position("Organization Admin")
                .with_organization(org),
            account("5", "Robert Super", "robert@tenanthr.com", Role::SuperAdmin)?
                .with_position("System Administrator"),
        ];
        Ok(Self::from_principals(principals))
    }

    /// Later principals replace earlier ones holding the same role.
    pub fn from_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: principals.into_iter().map(|p| (p.role, p)).collect(),
        }
    }

    pub fn get(&self, role: Role) -> Option<&Principal> {
        self.principals.get(&role)
    }
}

#[async_trait]
impl PrincipalDirectory for DemoDirectory {
    async fn resolve(&self, role: Role) -> Result<Option<Principal>, DirectoryError> {
        Ok(self.principals.get(&role).cloned())
    }
}

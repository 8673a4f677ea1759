use serde::{Deserialize, Serialize};

use tenanthr_core::{DomainError, DomainResult, Entity, OrganizationId, PrincipalId};

use crate::Role;

/// The authenticated user of the current session.
///
/// A principal holds exactly one role. Everything beyond identity and role is
/// display metadata for the view screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Principal {
    pub fn new(
        id: PrincipalId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_lowercase();

        if name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(Self {
            id,
            name,
            email,
            role,
            organization_id: None,
            department: None,
            position: None,
            avatar: None,
        })
    }

    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

impl Entity for Principal {
    type Id = PrincipalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PrincipalId {
        PrincipalId::new(s).unwrap()
    }

    #[test]
    fn email_is_normalized() {
        let p = Principal::new(pid("7"), " Ada ", "Ada@Example.COM ", Role::Hr).unwrap();
        assert_eq!(p.name, "Ada");
        assert_eq!(p.email, "ada@example.com");
        assert_eq!(p.id(), &pid("7"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let err = Principal::new(pid("7"), "Ada", "not-an-email", Role::Hr).unwrap_err();
        assert_eq!(err, DomainError::validation("invalid email format"));
    }

    #[test]
    fn optional_metadata_is_omitted_from_json() {
        let p = Principal::new(pid("5"), "Robert Super", "robert@tenanthr.com", Role::SuperAdmin)
            .unwrap()
            .with_position("System Administrator");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["role"], "super-admin");
        assert_eq!(json["position"], "System Administrator");
        assert!(json.get("organization_id").is_none());
    }
}

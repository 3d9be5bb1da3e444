//! Tenant context for multi-tenant operations
//!
//! Every page, section and branding lookup is scoped by tenant (school) id.
//! The admin flag gates the composer and editor.

use crate::error::{PortalError, Result};

/// Tenant context passed to all page operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantContext {
    /// School identifier
    pub tenant_id: String,
    /// Whether the current user may edit the site
    pub is_admin: bool,
}

impl TenantContext {
    /// Context for a school administrator
    pub fn admin(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            is_admin: true,
        }
    }

    /// Context for a public-site visitor (read-only)
    pub fn visitor(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            is_admin: false,
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Fail with `PermissionDenied` unless this context is an admin
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(PortalError::PermissionDenied(format!(
                "{} requires admin access for tenant {}",
                action, self.tenant_id
            )))
        }
    }
}

impl std::fmt::Display for TenantContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TenantContext({}, admin={})", self.tenant_id, self.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allowed() {
        assert!(TenantContext::admin("school-a").require_admin("edit").is_ok());
    }

    #[test]
    fn test_visitor_denied() {
        let err = TenantContext::visitor("school-a")
            .require_admin("edit page")
            .unwrap_err();
        assert!(matches!(err, PortalError::PermissionDenied(_)));
        assert!(err.to_string().contains("school-a"));
    }
}

//! Role configuration

use crate::context::AuthenticatedUser;

/// Role identifiers with elevated access.
///
/// Read once at startup and handed to the domain state; handlers never read
/// role ids from the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleConfig {
    pub admin_role_id: String,
    pub superadmin_role_id: String,
}

impl RoleConfig {
    pub fn new(admin_role_id: impl Into<String>, superadmin_role_id: impl Into<String>) -> Self {
        Self {
            admin_role_id: admin_role_id.into(),
            superadmin_role_id: superadmin_role_id.into(),
        }
    }

    /// ADMIN or SUPERADMIN
    pub fn is_privileged(&self, user: &AuthenticatedUser) -> bool {
        user.user_type == self.admin_role_id || user.user_type == self.superadmin_role_id
    }
}

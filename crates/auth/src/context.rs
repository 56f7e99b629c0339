//! Authenticated user context

use serde::{Deserialize, Serialize};

/// Identity attached to a request by the upstream authentication layer.
///
/// This layer only reads it; creation and verification happen upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    /// Role identifier, compared against [`crate::RoleConfig`]
    pub user_type: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: i64, user_type: impl Into<String>) -> Self {
        Self {
            user_id,
            user_type: user_type.into(),
        }
    }
}

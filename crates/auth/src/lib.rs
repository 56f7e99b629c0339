//! Authenticated-user context for the booking API
//!
//! Authentication itself happens upstream. This crate carries the resulting
//! identity into handlers as an explicit value and holds the role
//! configuration used for privilege checks.

mod config;
mod context;
mod error;
mod extractors;

pub use config::RoleConfig;
pub use context::AuthenticatedUser;
pub use error::AuthError;
pub use extractors::{AuthUser, USER_ID_HEADER, USER_TYPE_HEADER};

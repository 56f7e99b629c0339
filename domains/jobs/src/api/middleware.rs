//! Jobs domain state

use crate::repository::BookingRepository;
use booking_auth::RoleConfig;
use std::sync::Arc;

/// Settings read once at startup and injected into the handlers
#[derive(Debug, Clone)]
pub struct JobsConfig {
    pub roles: RoleConfig,
    /// Sender address for immediate job emails
    pub admin_sender_email: String,
    /// Report SMS send failures as `{"success": <message>}` with 200
    pub sms_failure_as_success: bool,
}

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub repo: Arc<dyn BookingRepository>,
    pub config: JobsConfig,
}

impl JobsState {
    pub fn new(repo: Arc<dyn BookingRepository>, config: JobsConfig) -> Self {
        Self { repo, config }
    }
}

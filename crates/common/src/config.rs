//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Role identifier of administrators
    pub admin_role_id: String,
    /// Role identifier of super administrators
    pub superadmin_role_id: String,

    /// Sender address used for immediate job emails
    pub admin_email: String,

    /// Report SMS send failures as `{"success": <message>}` with 200
    pub sms_failure_as_success: bool,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            admin_role_id: env::var("ADMIN_ROLE_ID")
                .map_err(|_| anyhow::anyhow!("ADMIN_ROLE_ID is required"))?,
            superadmin_role_id: env::var("SUPERADMIN_ROLE_ID")
                .map_err(|_| anyhow::anyhow!("SUPERADMIN_ROLE_ID is required"))?,

            admin_email: env::var("ADMIN_EMAIL")
                .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL is required"))?,

            sms_failure_as_success: env::var("SMS_FAILURE_AS_SUCCESS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "booking=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

/// Interpret an environment flag (`1`, `true`, `yes`, `on`)
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

//! Booking API application composition root
//!
//! Composes the jobs domain router with the shared infrastructure routes.

use axum::{extract::DefaultBodyLimit, Router};
use booking_auth::RoleConfig;
use booking_common::config::Config;
use booking_jobs::api::{JobsConfig, JobsState};
use booking_jobs::{BookingRepository, BookingRepositoryFactory, RepositoryConfig};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router, building the repository from the environment
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let repo_config = RepositoryConfig::from_env()?;
    let repo = BookingRepositoryFactory::create(repo_config)?;

    Ok(create_app_with_repository(config, Arc::from(repo)))
}

/// Create the main application router around an existing repository
pub fn create_app_with_repository(config: &Config, repo: Arc<dyn BookingRepository>) -> Router {
    let jobs_state = JobsState::new(
        repo,
        JobsConfig {
            roles: RoleConfig::new(&config.admin_role_id, &config.superadmin_role_id),
            admin_sender_email: config.admin_email.clone(),
            sms_failure_as_success: config.sms_failure_as_success,
        },
    );

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async {
                concat!("Booking API v", env!("CARGO_PKG_VERSION"))
            }),
        )
        .merge(booking_jobs::api::routes().with_state(jobs_state))
}

/// CORS layer for a comma-separated origin list; no CORS headers when none is valid
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let allowed: Vec<_> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match axum::http::HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

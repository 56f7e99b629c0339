//! Booking repository port
//!
//! All business rules, persistence and notification delivery live behind
//! [`BookingRepository`]. Two implementations are provided:
//! - [`http::HttpBookingRepository`] forwards every call to the booking backend
//! - [`mock::MockBookingRepository`] records calls in memory for tests and local runs

pub mod http;
pub mod mock;

use booking_auth::AuthenticatedUser;
use booking_common::Error;
use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::{
    DistanceUpdate, Job, JobAdminFields, JobId, NotificationAudience, Payload, UserId,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Repository configuration error: {0}")]
    Configuration(String),

    #[error("Booking backend request error: {0}")]
    Request(String),

    #[error("Booking backend responded {status}: {message}")]
    Response { status: u16, message: String },

    #[error("Booking backend response could not be decoded: {0}")]
    Decode(String),

    #[error("{0}")]
    NotFound(String),
}

impl RepositoryError {
    /// The underlying failure message, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::Configuration(m)
            | RepositoryError::Request(m)
            | RepositoryError::Decode(m)
            | RepositoryError::NotFound(m) => m,
            RepositoryError::Response { message, .. } => message,
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(m) => Error::NotFound(m),
            RepositoryError::Configuration(m) => Error::Internal(m),
            RepositoryError::Response { status: 404, message } => Error::NotFound(message),
            other => Error::Upstream(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Booking repository: every domain operation the request handlers delegate to.
///
/// Operations returning `Value` hand back the backend's result untouched; the
/// handlers forward it as the response body.
#[async_trait::async_trait]
pub trait BookingRepository: Send + Sync {
    /// Jobs belonging to a customer or translator
    async fn get_users_jobs(&self, user_id: UserId) -> RepositoryResult<Value>;

    /// All jobs, filtered by the request input (admin listing)
    async fn get_all(&self, filters: &Payload) -> RepositoryResult<Value>;

    async fn find(&self, id: JobId) -> RepositoryResult<Option<Job>>;

    /// Like [`find`](Self::find), with the translator relation and its user loaded
    async fn find_with_translator(&self, id: JobId) -> RepositoryResult<Option<Job>>;

    async fn store(&self, user: &AuthenticatedUser, data: &Payload) -> RepositoryResult<Value>;

    async fn update_job(
        &self,
        id: JobId,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value>;

    async fn store_job_email(
        &self,
        data: &Payload,
        admin_sender_email: &str,
    ) -> RepositoryResult<Value>;

    async fn get_users_jobs_history(
        &self,
        user_id: UserId,
        filters: &Payload,
    ) -> RepositoryResult<Value>;

    async fn accept_job(&self, data: &Payload, user: &AuthenticatedUser)
        -> RepositoryResult<Value>;

    async fn accept_job_with_id(
        &self,
        job_id: JobId,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value>;

    async fn cancel_job(&self, data: &Payload, user: &AuthenticatedUser)
        -> RepositoryResult<Value>;

    async fn end_job(&self, data: &Payload) -> RepositoryResult<Value>;

    /// Mark the customer as a no-show
    async fn customer_not_call(&self, data: &Payload) -> RepositoryResult<Value>;

    /// Open jobs the translator could take
    async fn get_potential_jobs(&self, user: &AuthenticatedUser) -> RepositoryResult<Value>;

    async fn reopen(&self, data: &Payload) -> RepositoryResult<Value>;

    /// Notification payload for a job
    async fn job_to_data(&self, job: &Job) -> RepositoryResult<Value>;

    async fn send_notification_translator(
        &self,
        job: &Job,
        job_data: &Value,
        audience: NotificationAudience,
    ) -> RepositoryResult<()>;

    async fn send_sms_notification_to_translator(&self, job: &Job) -> RepositoryResult<()>;

    async fn update_distance(&self, job_id: JobId, update: &DistanceUpdate)
        -> RepositoryResult<()>;

    async fn update_job_admin_fields(
        &self,
        job_id: JobId,
        fields: &JobAdminFields,
    ) -> RepositoryResult<()>;
}

/// Booking repository configuration.
#[derive(Clone)]
pub struct RepositoryConfig {
    /// Repository provider (http, mock)
    pub provider: String,
    /// Base URL of the booking backend
    pub base_url: String,
    /// Optional bearer token for the booking backend
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RepositoryConfig {
    /// Create repository config from environment variables.
    pub fn from_env() -> Result<Self, RepositoryError> {
        let provider =
            std::env::var("BOOKING_REPOSITORY_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let base_url = std::env::var("BOOKING_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

        let token = std::env::var("BOOKING_BACKEND_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let timeout_secs = match std::env::var("BOOKING_BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                RepositoryError::Configuration(format!(
                    "BOOKING_BACKEND_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            provider,
            base_url,
            token,
            timeout_secs,
        })
    }
}

/// Factory for creating BookingRepository implementations.
pub struct BookingRepositoryFactory;

impl BookingRepositoryFactory {
    /// Create a BookingRepository based on configuration.
    pub fn create(config: RepositoryConfig) -> Result<Box<dyn BookingRepository>, RepositoryError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP booking repository");
                if config.base_url.trim().is_empty() {
                    return Err(RepositoryError::Configuration(
                        "BOOKING_BACKEND_URL is required for http provider".to_string(),
                    ));
                }
                Ok(Box::new(http::HttpBookingRepository::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock booking repository");
                Ok(Box::new(mock::MockBookingRepository::new()))
            }
            provider => Err(RepositoryError::Configuration(format!(
                "Unknown booking repository provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}

//! HTTP booking repository
//!
//! Forwards each repository operation as a JSON request to the booking
//! backend at `{base_url}/...`. The backend owns validation, persistence and
//! notification delivery; results are returned as received.

use std::time::Duration;

use booking_auth::AuthenticatedUser;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use super::{BookingRepository, RepositoryConfig, RepositoryError, RepositoryResult};
use crate::domain::entities::{
    DistanceUpdate, Job, JobAdminFields, JobId, NotificationAudience, Payload, UserId,
};

/// Relation loaded by [`BookingRepository::find_with_translator`]
const TRANSLATOR_RELATION: &str = "translatorJobRel.user";

/// Booking repository backed by the booking backend's HTTP API.
pub struct HttpBookingRepository {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBookingRepository {
    pub fn new(config: RepositoryConfig) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON result. An empty body decodes to `null`.
    async fn send(&self, builder: RequestBuilder) -> RepositoryResult<Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| RepositoryError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RepositoryError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            tracing::warn!(status = status.as_u16(), message = %message, "Booking backend returned an error");
            return Err(RepositoryError::Response {
                status: status.as_u16(),
                message,
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> RepositoryResult<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn fetch_job(&self, builder: RequestBuilder) -> RepositoryResult<Option<Job>> {
        match self.send(builder).await {
            Ok(Value::Null) => Ok(None),
            Ok(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| RepositoryError::Decode(e.to_string())),
            Err(RepositoryError::Response { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// `message` or `error` field of a JSON error body, or the raw text
fn error_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(s)) => Some(s),
        _ => Some(String::from_utf8_lossy(body).into_owned()),
    }
}

#[async_trait::async_trait]
impl BookingRepository for HttpBookingRepository {
    async fn get_users_jobs(&self, user_id: UserId) -> RepositoryResult<Value> {
        self.send(self.request(Method::GET, &format!("/users/{}/jobs", user_id)))
            .await
    }

    async fn get_all(&self, filters: &Payload) -> RepositoryResult<Value> {
        self.send(self.request(Method::POST, "/jobs/search").json(filters))
            .await
    }

    async fn find(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        self.fetch_job(self.request(Method::GET, &format!("/jobs/{}", id)))
            .await
    }

    async fn find_with_translator(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        self.fetch_job(
            self.request(Method::GET, &format!("/jobs/{}", id))
                .query(&[("with", TRANSLATOR_RELATION)]),
        )
        .await
    }

    async fn store(&self, user: &AuthenticatedUser, data: &Payload) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs")
                .json(&json!({ "user": user, "data": data })),
        )
        .await
    }

    async fn update_job(
        &self,
        id: JobId,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::PUT, &format!("/jobs/{}", id))
                .json(&json!({ "user": user, "data": data })),
        )
        .await
    }

    async fn store_job_email(
        &self,
        data: &Payload,
        admin_sender_email: &str,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/email")
                .json(&json!({ "data": data, "admin_sender_email": admin_sender_email })),
        )
        .await
    }

    async fn get_users_jobs_history(
        &self,
        user_id: UserId,
        filters: &Payload,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, &format!("/users/{}/jobs/history", user_id))
                .json(filters),
        )
        .await
    }

    async fn accept_job(
        &self,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/accept")
                .json(&json!({ "user": user, "data": data })),
        )
        .await
    }

    async fn accept_job_with_id(
        &self,
        job_id: JobId,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, &format!("/jobs/{}/accept", job_id))
                .json(&json!({ "user": user })),
        )
        .await
    }

    async fn cancel_job(
        &self,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/cancel")
                .json(&json!({ "user": user, "data": data })),
        )
        .await
    }

    async fn end_job(&self, data: &Payload) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/end")
                .json(&json!({ "data": data })),
        )
        .await
    }

    async fn customer_not_call(&self, data: &Payload) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/customer-not-call")
                .json(&json!({ "data": data })),
        )
        .await
    }

    async fn get_potential_jobs(&self, user: &AuthenticatedUser) -> RepositoryResult<Value> {
        self.send(
            self.request(
                Method::POST,
                &format!("/users/{}/potential-jobs", user.user_id),
            )
            .json(&json!({ "user": user })),
        )
        .await
    }

    async fn reopen(&self, data: &Payload) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, "/jobs/reopen")
                .json(&json!({ "data": data })),
        )
        .await
    }

    async fn job_to_data(&self, job: &Job) -> RepositoryResult<Value> {
        self.send(
            self.request(Method::POST, &format!("/jobs/{}/notification-data", job.id))
                .json(&json!({ "job": job })),
        )
        .await
    }

    async fn send_notification_translator(
        &self,
        job: &Job,
        job_data: &Value,
        audience: NotificationAudience,
    ) -> RepositoryResult<()> {
        self.send_unit(
            self.request(Method::POST, &format!("/jobs/{}/notifications/push", job.id))
                .json(&json!({ "job_data": job_data, "audience": audience })),
        )
        .await?;
        tracing::debug!(job_id = job.id, "Push notification dispatched");
        Ok(())
    }

    async fn send_sms_notification_to_translator(&self, job: &Job) -> RepositoryResult<()> {
        self.send_unit(
            self.request(Method::POST, &format!("/jobs/{}/notifications/sms", job.id))
                .json(&json!({ "job": job })),
        )
        .await?;
        tracing::debug!(job_id = job.id, "SMS notification dispatched");
        Ok(())
    }

    async fn update_distance(
        &self,
        job_id: JobId,
        update: &DistanceUpdate,
    ) -> RepositoryResult<()> {
        self.send_unit(
            self.request(Method::PUT, &format!("/jobs/{}/distance", job_id))
                .json(update),
        )
        .await
    }

    async fn update_job_admin_fields(
        &self,
        job_id: JobId,
        fields: &JobAdminFields,
    ) -> RepositoryResult<()> {
        self.send_unit(
            self.request(Method::PATCH, &format!("/jobs/{}/admin-fields", job_id))
                .json(fields),
        )
        .await
    }
}

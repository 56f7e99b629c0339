//! Mock Booking Repository Implementation
//!
//! Records every call in memory for test assertions and serves scripted
//! responses. Thread-safe via `Arc<Mutex<>>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use booking_auth::AuthenticatedUser;
use serde_json::{json, Value};

use super::{BookingRepository, RepositoryError, RepositoryResult};
use crate::domain::entities::{
    Distance, DistanceUpdate, Job, JobAdminFields, JobId, NotificationAudience, Payload, UserId,
};

/// A repository call as received by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    GetUsersJobs { user_id: UserId },
    GetAll { filters: Payload },
    Find { id: JobId },
    FindWithTranslator { id: JobId },
    Store { user: AuthenticatedUser, data: Payload },
    UpdateJob { id: JobId, data: Payload, user: AuthenticatedUser },
    StoreJobEmail { data: Payload, admin_sender_email: String },
    GetUsersJobsHistory { user_id: UserId, filters: Payload },
    AcceptJob { data: Payload, user: AuthenticatedUser },
    AcceptJobWithId { job_id: JobId, user: AuthenticatedUser },
    CancelJob { data: Payload, user: AuthenticatedUser },
    EndJob { data: Payload },
    CustomerNotCall { data: Payload },
    GetPotentialJobs { user: AuthenticatedUser },
    Reopen { data: Payload },
    JobToData { job_id: JobId },
    SendNotificationTranslator { job_id: JobId, job_data: Value, audience: NotificationAudience },
    SendSmsNotificationToTranslator { job_id: JobId },
    UpdateDistance { job_id: JobId, update: DistanceUpdate },
    UpdateJobAdminFields { job_id: JobId, fields: JobAdminFields },
}

impl RecordedCall {
    /// Operation name, as used by [`MockBookingRepository::respond_with`] and
    /// [`MockBookingRepository::fail_with`]
    pub fn operation(&self) -> &'static str {
        match self {
            RecordedCall::GetUsersJobs { .. } => "get_users_jobs",
            RecordedCall::GetAll { .. } => "get_all",
            RecordedCall::Find { .. } => "find",
            RecordedCall::FindWithTranslator { .. } => "find_with_translator",
            RecordedCall::Store { .. } => "store",
            RecordedCall::UpdateJob { .. } => "update_job",
            RecordedCall::StoreJobEmail { .. } => "store_job_email",
            RecordedCall::GetUsersJobsHistory { .. } => "get_users_jobs_history",
            RecordedCall::AcceptJob { .. } => "accept_job",
            RecordedCall::AcceptJobWithId { .. } => "accept_job_with_id",
            RecordedCall::CancelJob { .. } => "cancel_job",
            RecordedCall::EndJob { .. } => "end_job",
            RecordedCall::CustomerNotCall { .. } => "customer_not_call",
            RecordedCall::GetPotentialJobs { .. } => "get_potential_jobs",
            RecordedCall::Reopen { .. } => "reopen",
            RecordedCall::JobToData { .. } => "job_to_data",
            RecordedCall::SendNotificationTranslator { .. } => "send_notification_translator",
            RecordedCall::SendSmsNotificationToTranslator { .. } => {
                "send_sms_notification_to_translator"
            }
            RecordedCall::UpdateDistance { .. } => "update_distance",
            RecordedCall::UpdateJobAdminFields { .. } => "update_job_admin_fields",
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    jobs: HashMap<JobId, Job>,
    distances: HashMap<JobId, Distance>,
    responses: HashMap<&'static str, Value>,
    failures: HashMap<&'static str, RepositoryError>,
}

/// Mock booking repository that records calls for test assertions.
#[derive(Debug, Clone, Default)]
pub struct MockBookingRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockBookingRepository {
    /// Create a new mock booking repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // Recorded state survives a panicking test thread
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make a job available to `find` and `find_with_translator`.
    pub fn with_job(self, job: Job) -> Self {
        self.lock().jobs.insert(job.id, job);
        self
    }

    /// Serve `response` for every call of `operation`.
    pub fn respond_with(self, operation: &'static str, response: Value) -> Self {
        self.lock().responses.insert(operation, response);
        self
    }

    /// Fail every call of `operation` with `error`.
    pub fn fail_with(self, operation: &'static str, error: RepositoryError) -> Self {
        self.lock().failures.insert(operation, error);
        self
    }

    /// Return all recorded calls.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Recorded calls of one operation.
    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .cloned()
            .collect()
    }

    /// Current state of a job, including admin fields written through the mock.
    pub fn job(&self, id: JobId) -> Option<Job> {
        self.lock().jobs.get(&id).cloned()
    }

    /// Distance row written through the mock.
    pub fn distance(&self, job_id: JobId) -> Option<Distance> {
        self.lock().distances.get(&job_id).cloned()
    }

    /// Clear recorded calls; scripted responses and stored rows are kept.
    pub fn reset(&self) {
        self.lock().calls.clear();
    }

    /// Record a call and return the scripted failure for it, if any.
    fn record(&self, call: RecordedCall) -> RepositoryResult<()> {
        let operation = call.operation();
        tracing::debug!(operation, "Mock booking repository: recording call");
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn response(&self, operation: &'static str) -> Value {
        self.lock()
            .responses
            .get(operation)
            .cloned()
            .unwrap_or_else(|| json!({ "status": "success" }))
    }

    fn respond(&self, call: RecordedCall) -> RepositoryResult<Value> {
        let operation = call.operation();
        self.record(call)?;
        Ok(self.response(operation))
    }
}

#[async_trait::async_trait]
impl BookingRepository for MockBookingRepository {
    async fn get_users_jobs(&self, user_id: UserId) -> RepositoryResult<Value> {
        self.respond(RecordedCall::GetUsersJobs { user_id })
    }

    async fn get_all(&self, filters: &Payload) -> RepositoryResult<Value> {
        self.respond(RecordedCall::GetAll {
            filters: filters.clone(),
        })
    }

    async fn find(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        self.record(RecordedCall::Find { id })?;
        Ok(self.job(id))
    }

    async fn find_with_translator(&self, id: JobId) -> RepositoryResult<Option<Job>> {
        self.record(RecordedCall::FindWithTranslator { id })?;
        Ok(self.job(id))
    }

    async fn store(&self, user: &AuthenticatedUser, data: &Payload) -> RepositoryResult<Value> {
        self.respond(RecordedCall::Store {
            user: user.clone(),
            data: data.clone(),
        })
    }

    async fn update_job(
        &self,
        id: JobId,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::UpdateJob {
            id,
            data: data.clone(),
            user: user.clone(),
        })
    }

    async fn store_job_email(
        &self,
        data: &Payload,
        admin_sender_email: &str,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::StoreJobEmail {
            data: data.clone(),
            admin_sender_email: admin_sender_email.to_string(),
        })
    }

    async fn get_users_jobs_history(
        &self,
        user_id: UserId,
        filters: &Payload,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::GetUsersJobsHistory {
            user_id,
            filters: filters.clone(),
        })
    }

    async fn accept_job(
        &self,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::AcceptJob {
            data: data.clone(),
            user: user.clone(),
        })
    }

    async fn accept_job_with_id(
        &self,
        job_id: JobId,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::AcceptJobWithId {
            job_id,
            user: user.clone(),
        })
    }

    async fn cancel_job(
        &self,
        data: &Payload,
        user: &AuthenticatedUser,
    ) -> RepositoryResult<Value> {
        self.respond(RecordedCall::CancelJob {
            data: data.clone(),
            user: user.clone(),
        })
    }

    async fn end_job(&self, data: &Payload) -> RepositoryResult<Value> {
        self.respond(RecordedCall::EndJob { data: data.clone() })
    }

    async fn customer_not_call(&self, data: &Payload) -> RepositoryResult<Value> {
        self.respond(RecordedCall::CustomerNotCall { data: data.clone() })
    }

    async fn get_potential_jobs(&self, user: &AuthenticatedUser) -> RepositoryResult<Value> {
        self.respond(RecordedCall::GetPotentialJobs { user: user.clone() })
    }

    async fn reopen(&self, data: &Payload) -> RepositoryResult<Value> {
        self.respond(RecordedCall::Reopen { data: data.clone() })
    }

    async fn job_to_data(&self, job: &Job) -> RepositoryResult<Value> {
        self.record(RecordedCall::JobToData { job_id: job.id })?;
        let scripted = self.lock().responses.get("job_to_data").cloned();
        Ok(scripted.unwrap_or_else(|| json!({ "job_id": job.id })))
    }

    async fn send_notification_translator(
        &self,
        job: &Job,
        job_data: &Value,
        audience: NotificationAudience,
    ) -> RepositoryResult<()> {
        self.record(RecordedCall::SendNotificationTranslator {
            job_id: job.id,
            job_data: job_data.clone(),
            audience,
        })
    }

    async fn send_sms_notification_to_translator(&self, job: &Job) -> RepositoryResult<()> {
        self.record(RecordedCall::SendSmsNotificationToTranslator { job_id: job.id })
    }

    async fn update_distance(
        &self,
        job_id: JobId,
        update: &DistanceUpdate,
    ) -> RepositoryResult<()> {
        self.record(RecordedCall::UpdateDistance {
            job_id,
            update: update.clone(),
        })?;
        self.lock().distances.insert(
            job_id,
            Distance {
                job_id,
                distance: update.distance.clone(),
                time: update.time.clone(),
            },
        );
        Ok(())
    }

    async fn update_job_admin_fields(
        &self,
        job_id: JobId,
        fields: &JobAdminFields,
    ) -> RepositoryResult<()> {
        self.record(RecordedCall::UpdateJobAdminFields {
            job_id,
            fields: fields.clone(),
        })?;
        // Like an UPDATE ... WHERE id = ?, a missing job is left untouched
        if let Some(job) = self.lock().jobs.get_mut(&job_id) {
            job.admin_comments = Some(fields.admin_comments.clone());
            job.flagged = Some(fields.flagged.to_string());
            job.session_time = Some(fields.session_time.clone());
            job.manually_handled = Some(fields.manually_handled.to_string());
            job.by_admin = Some(fields.by_admin.to_string());
        }
        Ok(())
    }
}

//! Job management API handlers
//!
//! Each handler reads the request input, forwards it to the booking
//! repository and returns the repository's JSON result as the body.

use axum::{
    extract::{Path, State},
    Json,
};
use booking_auth::AuthUser;
use booking_common::{Error, RequestInput, Result};
use serde_json::Value;

use crate::api::middleware::JobsState;
use crate::domain::entities::JobId;

/// Fields of an edit form that must never reach the repository
const FORM_ONLY_FIELDS: [&str; 2] = ["_token", "submit"];

/// Parse a job id from a path segment
pub(crate) fn parse_job_id(raw: &str) -> Result<JobId> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid job id '{}'", raw)))
}

/// List jobs: a given user's jobs, or every job for administrators
pub async fn list_jobs(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    if let Some(user_id) = input.get_i64("user_id")? {
        tracing::debug!(user_id, "Listing jobs of user");
        let jobs = state.repo.get_users_jobs(user_id).await?;
        return Ok(Json(jobs));
    }

    if state.config.roles.is_privileged(&user) {
        tracing::debug!(user_id = user.user_id, "Listing all jobs");
        let jobs = state.repo.get_all(input.inner()).await?;
        return Ok(Json(jobs));
    }

    Ok(Json(Value::Null))
}

/// Get a single job with its translator relation
pub async fn get_job(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_job_id(&id)?;

    let job = state
        .repo
        .find_with_translator(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))?;

    Ok(Json(serde_json::to_value(job)?))
}

/// Create a job on behalf of the authenticated user
pub async fn create_job(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let created = state.repo.store(&user, input.inner()).await?;

    tracing::info!(user_id = user.user_id, "Job created");
    Ok(Json(created))
}

/// Update a job
pub async fn update_job(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<String>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let id = parse_job_id(&id)?;
    let data = input.without(&FORM_ONLY_FIELDS);

    let updated = state.repo.update_job(id, &data, &user).await?;

    tracing::info!(job_id = id, user_id = user.user_id, "Job updated");
    Ok(Json(updated))
}

/// Store a job and email it immediately from the admin address
pub async fn send_immediate_job_email(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state
        .repo
        .store_job_email(input.inner(), &state.config.admin_sender_email)
        .await?;
    Ok(Json(result))
}

/// Job history of a user; `null` without a `user_id`
pub async fn get_job_history(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let Some(user_id) = input.get_i64("user_id")? else {
        return Ok(Json(Value::Null));
    };

    let history = state
        .repo
        .get_users_jobs_history(user_id, input.inner())
        .await?;
    Ok(Json(history))
}

/// Accept a job described by the request input
pub async fn accept_job(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state.repo.accept_job(input.inner(), &user).await?;
    Ok(Json(result))
}

/// Accept the job named by `job_id`
pub async fn accept_job_with_id(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let job_id = input
        .get_i64("job_id")?
        .ok_or_else(|| Error::Validation("'job_id' is required".to_string()))?;

    let result = state.repo.accept_job_with_id(job_id, &user).await?;

    tracing::info!(job_id, user_id = user.user_id, "Job accepted");
    Ok(Json(result))
}

/// Cancel a job on behalf of the authenticated user
pub async fn cancel_job(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state.repo.cancel_job(input.inner(), &user).await?;
    Ok(Json(result))
}

/// Mark a job as finished
pub async fn end_job(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state.repo.end_job(input.inner()).await?;
    Ok(Json(result))
}

/// Record that the customer did not show up
pub async fn customer_not_call(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state.repo.customer_not_call(input.inner()).await?;
    Ok(Json(result))
}

/// Jobs the authenticated translator could take. The request body is not used.
pub async fn get_potential_jobs(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
) -> Result<Json<Value>> {
    let jobs = state.repo.get_potential_jobs(&user).await?;
    Ok(Json(jobs))
}

/// Reopen a cancelled or expired job
pub async fn reopen_job(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<Value>> {
    let result = state.repo.reopen(input.inner()).await?;
    Ok(Json(result))
}

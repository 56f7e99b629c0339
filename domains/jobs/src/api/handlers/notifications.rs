//! Translator notification resend handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use booking_auth::AuthUser;
use booking_common::{Error, RequestInput, Result};
use serde_json::json;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Job, NotificationAudience, SmsOutcome};

async fn find_job(state: &JobsState, input: &RequestInput) -> Result<Job> {
    let job_id = input
        .get_i64("jobid")?
        .ok_or_else(|| Error::Validation("'jobid' is required".to_string()))?;

    state
        .repo
        .find(job_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Job {} not found", job_id)))
}

/// Push the job to every translator again
pub async fn resend_push_notification(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Json<serde_json::Value>> {
    let job = find_job(&state, &input).await?;
    let job_data = state.repo.job_to_data(&job).await?;

    state
        .repo
        .send_notification_translator(&job, &job_data, NotificationAudience::All)
        .await?;

    tracing::info!(job_id = job.id, "Push notification resent");
    Ok(Json(json!({ "success": "Push sent" })))
}

/// Send the job's translator an SMS again.
///
/// Only the send step is caught; a failed lookup or payload build is an
/// ordinary error.
pub async fn resend_sms_notification(
    AuthUser(_user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<Response> {
    let job = find_job(&state, &input).await?;
    let _job_data = state.repo.job_to_data(&job).await?;

    let outcome = match state.repo.send_sms_notification_to_translator(&job).await {
        Ok(()) => SmsOutcome::Sent,
        Err(e) => {
            tracing::warn!(job_id = job.id, error = %e, "SMS notification failed");
            SmsOutcome::Failed {
                error: e.message().to_string(),
            }
        }
    };

    Ok(sms_response(outcome, state.config.sms_failure_as_success))
}

fn sms_response(outcome: SmsOutcome, failure_as_success: bool) -> Response {
    match outcome {
        SmsOutcome::Sent => (
            StatusCode::OK,
            Json(json!({ "status": "sent", "success": "SMS sent" })),
        )
            .into_response(),
        SmsOutcome::Failed { error } if failure_as_success => {
            (StatusCode::OK, Json(json!({ "success": error }))).into_response()
        }
        failed @ SmsOutcome::Failed { .. } => {
            (StatusCode::BAD_GATEWAY, Json(failed)).into_response()
        }
    }
}

//! Route definitions for Jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{distance_feed, jobs, notifications};
use super::middleware::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .patch(jobs::update_job),
        )
        .route("/jobs/email", post(jobs::send_immediate_job_email))
        .route("/jobs/history", get(jobs::get_job_history))
        .route("/jobs/accept", post(jobs::accept_job))
        .route("/jobs/accept-by-id", post(jobs::accept_job_with_id))
        .route("/jobs/cancel", post(jobs::cancel_job))
        .route("/jobs/end", post(jobs::end_job))
        .route("/jobs/no-show", post(jobs::customer_not_call))
        .route("/jobs/potential", get(jobs::get_potential_jobs))
        .route("/jobs/reopen", post(jobs::reopen_job))
        .route(
            "/jobs/notify/push",
            post(notifications::resend_push_notification),
        )
        .route(
            "/jobs/notify/sms",
            post(notifications::resend_sms_notification),
        )
        .route("/distance-feed", post(distance_feed::update_distance_feed))
}

//! Distance feed handler

use axum::extract::State;
use booking_auth::AuthUser;
use booking_common::{RequestInput, Result};

use crate::api::middleware::JobsState;
use crate::domain::distance_feed::DistanceFeed;

/// Confirmation returned by the distance feed, whatever was written
pub const RECORD_UPDATED: &str = "Record updated!";

/// Store computed distance/time for a job and apply admin annotations
pub async fn update_distance_feed(
    AuthUser(user): AuthUser,
    State(state): State<JobsState>,
    input: RequestInput,
) -> Result<&'static str> {
    let feed = DistanceFeed::from_input(&input);

    let Some(job_id) = feed.target_job() else {
        tracing::warn!(
            jobid = %feed.job_id,
            user_id = user.user_id,
            "Distance feed without a valid job id, nothing updated"
        );
        return Ok(RECORD_UPDATED);
    };

    if let Some(update) = feed.distance_update() {
        state.repo.update_distance(job_id, &update).await?;
        tracing::debug!(job_id, "Distance updated");
    }

    if let Some(fields) = feed.admin_fields() {
        state.repo.update_job_admin_fields(job_id, &fields).await?;
        tracing::debug!(job_id, flagged = %fields.flagged, "Job admin fields updated");
    }

    Ok(RECORD_UPDATED)
}

//! Distance feed: computed distance/time for a job plus optional admin annotations

use booking_common::RequestInput;

use crate::domain::entities::{DistanceUpdate, JobAdminFields, JobId, YesNo};

/// Raw distance feed fields, each defaulting to `""`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceFeed {
    pub distance: String,
    pub time: String,
    pub job_id: String,
    pub session_time: String,
    pub flagged: String,
    pub admin_comment: String,
    pub manually_handled: String,
    pub by_admin: String,
}

impl DistanceFeed {
    pub fn from_input(input: &RequestInput) -> Self {
        Self {
            distance: input.str_or_empty("distance"),
            time: input.str_or_empty("time"),
            job_id: input.str_or_empty("jobid"),
            session_time: input.str_or_empty("session_time"),
            flagged: input.str_or_empty("flagged"),
            admin_comment: input.str_or_empty("admincomment"),
            manually_handled: input.str_or_empty("manually_handled"),
            by_admin: input.str_or_empty("by_admin"),
        }
    }

    /// Target job, if the feed names a valid one
    pub fn target_job(&self) -> Option<JobId> {
        self.job_id.trim().parse().ok()
    }

    /// A job is only flagged when the flag comes with a comment
    pub fn flagged(&self) -> YesNo {
        YesNo::from_bool(self.flagged == "true" && !self.admin_comment.is_empty())
    }

    pub fn manually_handled(&self) -> YesNo {
        YesNo::from_flag(&self.manually_handled)
    }

    pub fn by_admin(&self) -> YesNo {
        YesNo::from_flag(&self.by_admin)
    }

    /// Distance row update, when distance or time is given
    pub fn distance_update(&self) -> Option<DistanceUpdate> {
        if self.distance.is_empty() && self.time.is_empty() {
            return None;
        }
        Some(DistanceUpdate {
            distance: self.distance.clone(),
            time: self.time.clone(),
        })
    }

    /// Job row update, when any admin field was submitted
    pub fn admin_fields(&self) -> Option<JobAdminFields> {
        let submitted = [
            &self.admin_comment,
            &self.session_time,
            &self.flagged,
            &self.manually_handled,
            &self.by_admin,
        ]
        .iter()
        .any(|v| !v.is_empty());

        if !submitted {
            return None;
        }

        Some(JobAdminFields {
            admin_comments: self.admin_comment.clone(),
            flagged: self.flagged(),
            session_time: self.session_time.clone(),
            manually_handled: self.manually_handled(),
            by_admin: self.by_admin(),
        })
    }
}

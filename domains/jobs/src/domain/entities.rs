//! Booking domain entities
//!
//! Jobs and distances are owned by the booking backend. These types carry the
//! fields this service reads or writes and keep everything else verbatim.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Backend primary key of a job
pub type JobId = i64;

/// Backend primary key of a user
pub type UserId = i64;

/// Free-form JSON object forwarded between the client and the backend
pub type Payload = Map<String, Value>;

/// Job as returned by the booking backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manually_handled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_admin: Option<String>,
    /// Assigned translator relation, loaded together with its user on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_job_rel: Option<Value>,
    /// Remaining backend columns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// A job with only its id set
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            user_id: None,
            status: None,
            admin_comments: None,
            flagged: None,
            session_time: None,
            manually_handled: None,
            by_admin: None,
            translator_job_rel: None,
            extra: Map::new(),
        }
    }
}

/// Computed distance and travel time of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub job_id: JobId,
    pub distance: String,
    pub time: String,
}

/// Two-valued flag stored on jobs as `"yes"` / `"no"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn from_bool(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }

    /// `Yes` only for the literal `"true"`
    pub fn from_flag(raw: &str) -> Self {
        Self::from_bool(raw == "true")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative annotations written to a job by the distance feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAdminFields {
    pub admin_comments: String,
    pub flagged: YesNo,
    pub session_time: String,
    pub manually_handled: YesNo,
    pub by_admin: YesNo,
}

/// Distance and time written to a job's distance row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceUpdate {
    pub distance: String,
    pub time: String,
}

/// Who receives a translator push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAudience {
    /// Every translator (wire form `"*"`)
    All,
}

impl Serialize for NotificationAudience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NotificationAudience::All => serializer.serialize_str("*"),
        }
    }
}

/// Outcome of sending an SMS to the job's translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SmsOutcome {
    Sent,
    Failed { error: String },
}

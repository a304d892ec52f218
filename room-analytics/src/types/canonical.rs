//! Canonical, UI-ready session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Availability of a session's recording, derived from its latest egress attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    /// No recording was attempted, or the latest attempt is in an unrecognized state
    #[default]
    None,
    /// A recording is starting, running or being finalized
    Processing,
    /// The latest recording completed and can be retrieved
    Available,
    /// The latest recording failed, was aborted or hit a limit
    Failed,
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingStatus::None => write!(fmt, "none"),
            RecordingStatus::Processing => write!(fmt, "processing"),
            RecordingStatus::Available => write!(fmt, "available"),
            RecordingStatus::Failed => write!(fmt, "failed"),
        }
    }
}

/// A normalized session. Every field is always populated.
///
/// For sessions that have not ended, `end_time` holds the instant the
/// normalizer ran while `duration` reads `Ongoing`. Use `duration` to tell
/// ongoing sessions apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CanonicalSession {
    pub id: String,
    pub room_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: String,
    pub participant_count: u32,
    pub recording_status: RecordingStatus,
}

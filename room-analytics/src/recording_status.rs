//! Derives a session's recording status from its egress history.

use crate::types::canonical::RecordingStatus;
use crate::types::upstream::{EgressStatus, RawEgressAttempt};

/// Resolves the recording status of a session.
///
/// Upstream only ever appends attempts, so the last entry is authoritative and
/// every earlier attempt is ignored. An absent or empty history yields
/// [`RecordingStatus::None`].
pub fn resolve(egress_history: Option<&[RawEgressAttempt]>) -> RecordingStatus {
    egress_history
        .and_then(|history| history.last())
        .map(|latest| RecordingStatus::from(&latest.status))
        .unwrap_or_default()
}

impl From<&EgressStatus> for RecordingStatus {
    fn from(status: &EgressStatus) -> Self {
        match status {
            EgressStatus::Complete => RecordingStatus::Available,
            EgressStatus::Starting | EgressStatus::Active | EgressStatus::Ending => {
                RecordingStatus::Processing
            }
            EgressStatus::Failed | EgressStatus::Aborted | EgressStatus::LimitReached => {
                RecordingStatus::Failed
            }
            EgressStatus::Unknown(_) => RecordingStatus::None,
        }
    }
}

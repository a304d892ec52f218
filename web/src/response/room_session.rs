//! Room session history response DTOs

use domain::room_session::SessionHistory;
use domain::CanonicalSession;
use serde::Serialize;
use utoipa::ToSchema;

/// One page of room session history, in upstream order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoomSessionsResponse {
    /// Normalized sessions. Empty when the project has no history for the filters.
    pub sessions: Vec<CanonicalSession>,

    /// Cursor for the following page, if there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl From<SessionHistory> for RoomSessionsResponse {
    fn from(history: SessionHistory) -> Self {
        Self {
            sessions: history.sessions,
            next_page_token: history.next_page_token,
        }
    }
}

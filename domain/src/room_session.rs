//! Room session history: one upstream fetch, then normalization of the page.

use crate::error::Error;
use crate::gateway::livekit_analytics::LiveKitAnalyticsClient;
use crate::gateway::{SessionFilters, SessionSource};
use log::*;
use room_analytics::{CanonicalSession, Clock, Normalizer, SystemClock};
use service::config::Config;

/// A page of canonical sessions in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHistory {
    pub sessions: Vec<CanonicalSession>,
    pub next_page_token: Option<String>,
}

/// Fetches one page from `source` and normalizes it using `clock` for "now".
///
/// An empty page is a valid, successful result.
pub async fn list(
    source: &dyn SessionSource,
    clock: &dyn Clock,
    filters: &SessionFilters,
) -> Result<SessionHistory, Error> {
    let page = source.fetch_sessions(filters).await?;

    let sessions = Normalizer::new(clock)
        .normalize_all(page.sessions)
        .map_err(|e| {
            warn!("Rejecting session history page: {e}");
            Error::from(e)
        })?;

    debug!("Normalized {} room sessions", sessions.len());

    Ok(SessionHistory {
        sessions,
        next_page_token: page.next_page_token,
    })
}

/// Lists session history from the LiveKit project configured in `config`.
pub async fn find_by(config: &Config, filters: &SessionFilters) -> Result<SessionHistory, Error> {
    let client = LiveKitAnalyticsClient::from_config(config)?;
    list(&client, &SystemClock, filters).await
}

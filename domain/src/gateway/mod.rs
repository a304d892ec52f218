//! Gateways to the third-party services this platform depends on.

use crate::error::Error;
use async_trait::async_trait;
use room_analytics::SessionsPage;

pub mod livekit_analytics;

/// Optional filters for a session history query.
///
/// Values are forwarded to upstream verbatim. Unset or empty fields are
/// omitted from the request entirely rather than sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilters {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub room_name: Option<String>,
}

impl SessionFilters {
    /// The query string pairs for the filters that are set and non-empty, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("limit", &self.limit),
            ("page", &self.page),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("room_name", &self.room_name),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (name, value))
        })
        .collect()
    }
}

/// A source of raw session history pages.
///
/// Implementations perform at most one upstream request per call and never
/// retry; retry policy belongs to the caller.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_sessions(&self, filters: &SessionFilters) -> Result<SessionsPage, Error>;
}

use domain::gateway::SessionFilters;
use serde::Deserialize;
use utoipa::IntoParams;

/// Session history filters. Every value is optional and forwarded upstream as-is.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Maximum number of sessions to return
    pub(crate) limit: Option<String>,
    /// Page cursor returned as `next_page_token` by a previous request
    pub(crate) page: Option<String>,
    /// Only sessions starting on or after this date
    pub(crate) start_date: Option<String>,
    /// Only sessions starting on or before this date
    pub(crate) end_date: Option<String>,
    /// Only sessions of rooms with this name
    pub(crate) room_name: Option<String>,
}

impl From<IndexParams> for SessionFilters {
    fn from(params: IndexParams) -> Self {
        SessionFilters {
            limit: params.limit,
            page: params.page,
            start_date: params.start_date,
            end_date: params.end_date,
            room_name: params.room_name,
        }
    }
}

use crate::controller::ApiResponse;
use crate::params::room_session::IndexParams;
use crate::response::room_session::RoomSessionsResponse;
use crate::Error;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::gateway::SessionFilters;
use domain::room_session as RoomSessionApi;
use service::AppState;

use log::*;

/// GET one page of normalized room session history
#[utoipa::path(
    get,
    path = "/room_sessions",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved room session history", body = RoomSessionsResponse),
        (status = 500, description = "Analytics credentials or project are not configured"),
        (status = 502, description = "Analytics service unreachable or returned an unexpected payload"),
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET room session history");
    debug!("Filter Params: {:?}", params);

    let filters = SessionFilters::from(params);
    let history = RoomSessionApi::find_by(app_state.config_ref(), &filters).await?;

    debug!("Found {} room sessions", history.sessions.len());

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        RoomSessionsResponse::from(history),
    )))
}

use crate::controller::{health_check_controller, room_session_controller};
use crate::response;
use axum::{routing::get, Router};
use service::AppState;

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Room History API"
        ),
        paths(
            health_check_controller::health_check,
            room_session_controller::index,
        ),
        components(
            schemas(
                domain::CanonicalSession,
                domain::RecordingStatus,
                response::room_session::RoomSessionsResponse,
            )
        ),
        tags(
            (name = "room_history", description = "Historical room sessions and their recordings")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(room_session_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn room_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/room_sessions", get(room_session_controller::index))
        .with_state(app_state)
}

use axum::http::{HeaderValue, Method};
use log::*;
use service::AppState;
use tower_http::cors::CorsLayer;

pub use self::error::{Error, Result};

mod controller;
mod error;
mod params;
mod response;
pub mod router;

/// Binds the configured interface and port, then serves the API until the process exits.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config_ref();
    let host = config.interface.as_deref().unwrap_or("127.0.0.1");
    let server_url = format!("{host}:{}", config.port);

    let cors = cors_layer(&config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}

/// Allows GET requests from the configured origins only. Origins that are not
/// valid header values are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
}

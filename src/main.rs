use log::{error, info};
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();

    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!("Starting room_history in {} mode", config.runtime_env());

    if config.livekit_project_id().is_none() {
        // Requests will answer 500 until the project is configured
        error!("LIVEKIT_PROJECT_ID is not set; session history requests will fail");
    }

    let app_state = AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated with error: {e}");
        std::process::exit(1);
    }
}

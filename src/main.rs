use log::{error, info};
use service::{config::Config, logging};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    logging::init(&config);

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let app_state = service::AppState::new(config, &db);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server error: {e}");
    }

    if let Err(e) = service::shutdown_database(&db).await {
        error!("Failed to dispose database connection pool: {e}");
        std::process::exit(1);
    }

    info!("Shutdown complete");
}

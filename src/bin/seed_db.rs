use log::{error, info};
use service::{config::Config, logging};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    logging::init(&config);

    info!("Seeding database...");

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);

    entity_api::seed_database(service_state.db_conn_ref()).await;
}

use config::Config;
use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::time::Duration;

pub mod config;
pub mod logging;

/// Constructs the process-wide database handle and its underlying connection
/// pool. Called exactly once at startup; the returned connection is shared
/// via [`AppState`]. An empty or malformed URL fails here, before any
/// connect attempt is made.
pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let descriptor = config
        .connection_descriptor()
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    info!("Connecting to database [{descriptor}]");
    info!(
        "Database pool config: max_connections={}, min_connections={}, \
         connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
        config.db_max_connections,
        config.db_min_connections,
        config.db_connect_timeout_secs,
        config.db_acquire_timeout_secs,
        config.db_idle_timeout_secs,
        config.db_max_lifetime_secs,
    );

    let mut opt = ConnectOptions::new::<&str>(config.database_url());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        // Bounded wait on pool exhaustion; acquisition fails after this
        // timeout instead of blocking forever.
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info)
        .set_schema_search_path("relay_platform"); // Setting default PostgreSQL schema

    let db = Database::connect(opt).await?;

    Ok(db)
}

/// Disposes the pool, closing all pooled connections. Call exactly once at
/// process teardown, after in-flight requests have drained.
pub async fn shutdown_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Disposing database connection pool");
    db.close_by_ref().await
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub chat_manager: Arc<chat::Manager>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, db: &Arc<DatabaseConnection>) -> Self {
        Self {
            database_connection: Arc::clone(db),
            chat_manager: Arc::new(chat::Manager::new()),
            config: app_config,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}

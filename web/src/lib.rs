use log::info;
use tokio::net::TcpListener;

pub(crate) mod controller;
pub mod error;
pub(crate) mod middleware;
pub(crate) mod params;
pub mod router;
pub(crate) mod ws;

pub use error::Error;
pub use service::AppState;

/// Binds the HTTP + WebSocket server and serves requests until a shutdown
/// signal arrives. Returns after the listener has drained.
pub async fn init_server(app_state: AppState) -> Result<(), std::io::Error> {
    let listen_addr = format!("{}:{}", app_state.config.interface, app_state.config.port);

    info!("Server starting... listening for requests on http://{listen_addr}");

    let listener = TcpListener::bind(listen_addr).await?;
    let router = router::define_routes(app_state);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

//! HTTP server for vdoc sites.
//!
//! Serves the rendered tree through the navigation model:
//! - `GET /` and `GET /{*path}`: assembled HTML page
//! - `GET /api/pages/{*path}`: the same page as JSON
//! - `GET /search?v=&q=&l=`: line search over one version and locale
//!
//! ```no_run
//! use std::sync::Arc;
//! use vdoc_config::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None, None)?;
//! vdoc_server::run_server(Arc::new(config)).await?;
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use vdoc_config::Config;
use vdoc_site::Site;

pub use app::create_router;
pub use error::ServerError;
pub use state::AppState;

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: Arc<Config>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.server.host, config.server.port))?;
    let state = Arc::new(AppState::new(Site::new(config)));
    let app = create_router(state);

    tracing::info!(address = %addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

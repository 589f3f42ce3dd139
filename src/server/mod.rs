/// HTTP surface - Gateway
mod error;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::AppState;

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        "Serving {} chapters on http://{} (data dir: {})",
        state.catalog.chapters().len(),
        listener.local_addr()?,
        state.cache.data_dir().display()
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

mod config;
mod relay;
mod room;
mod signaling;

pub use config::*;
pub use relay::*;
pub use room::*;
pub use signaling::*;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP surface of the rendezvous service: `GET /ws` upgrades to the
/// signaling socket, `GET /health` reports liveness.
pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .with_state(service)
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let service = SignalingService::new(&config);
    serve_with(listener, service).await
}

pub async fn serve_with(listener: TcpListener, service: SignalingService) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Signaling server listening on ws://{}/ws", addr);

    axum::serve(listener, router(service))
        .await
        .context("Signaling server stopped")?;
    Ok(())
}

//! # tablechat-server
//!
//! The web shell around the `tablechat` library: per-session state, the
//! chat/upload/configuration REST surface, the static chat page, and the
//! telemetry setup.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod telemetry;

use crate::config::AppConfig;
use crate::state::build_app_state;
use tracing::info;

/// Builds the application state and serves it on the given listener.
pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> anyhow::Result<()> {
    let app_state = build_app_state(config)?;
    let app = router::create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

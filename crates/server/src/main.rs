use std::net::SocketAddr;
use tablechat_server::{config::get_config, run, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = get_config(None)?;
    telemetry::init(&config.log_dir)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {addr}");
    run(listener, config).await
}

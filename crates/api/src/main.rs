//! PPG Blood Pressure Server - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load(None)?;
    init_logging(config.json_logs);

    info!("=== PPG Blood Pressure Server v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Channel {} at {} Hz, {} model artifact(s) configured",
        config.channel,
        config.pipeline.sample_rate_hz,
        config.models.len()
    );

    run_server(config).await
}

//! Orderbot Gateway - Main entry point.

use anyhow::Result;
use orderbot_common::config::GatewayConfig;
use orderbot_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Orderbot Gateway v{}", env!("CARGO_PKG_VERSION"));

    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /chat will report a configuration error");
    }

    // Start the gateway server
    orderbot_gateway::start_server(&config).await
}

use log::info;
use statuslist_http::config::{http_config, HTTPConfig};
use statuslist_http::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get config from file at STATUSLIST_CONFIG
    let config = HTTPConfig::clone(http_config());

    // Print config
    info!("{}", config);
    let addr = config.to_address();

    // Init server
    let server = server::server(config)?;

    // Logging
    tracing::debug!("listening on {}", addr);

    server.await?;

    Ok(())
}

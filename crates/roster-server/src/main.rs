//! # Roster Server
//!
//! Main entry point: loads configuration, installs tracing, wires the
//! application and serves until shutdown.

use roster_config::ConfigLoader;
use roster_core::{
    telemetry::{init_telemetry, TelemetryConfig},
    RosterResult,
};
use roster_server::{startup::print_banner, Application};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RosterResult<()> {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            // report through the default subscriber
            init_telemetry(&TelemetryConfig::default())?;
            return Err(e);
        }
    };

    init_telemetry(&config.observability.telemetry())?;
    print_banner();

    info!("Starting {} v{}...", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    Application::build(config).await?.run().await
}

//! Namunamu - meal-planning and nutrition web service
//!
#![doc = "Namunamu - meal-planning and nutrition web service"]
#![doc = "Main entry point for the Namunamu server binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use namunamu::cli::{Cli, Commands};
use namunamu::config::Config;
use namunamu::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let mut config = Config::load(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                tracing::debug!("Using host override: {}", host);
                config.server.host = host;
            }
            if let Some(port) = port {
                tracing::debug!("Using port override: {}", port);
                config.server.port = port;
            }

            // Validate configuration after overrides
            config.validate()?;

            tracing::info!("Starting HTTP server");
            let host = config.server.host.clone();
            let port = config.server.port;
            let state = AppState::from_config(config)?;
            server::serve(state, &host, port).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "namunamu=debug"
    } else {
        "namunamu=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

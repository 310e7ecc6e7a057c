//! Gatehouse driver binary.
//!
//! # Usage
//!
//! ```bash
//! # Run the scripted session
//! gatehouse
//!
//! # Place a different bet and show session internals
//! gatehouse --bet "Red wins" --log-level debug
//! ```

use clap::Parser;
use gatehouse_cli::{CliError, DemoConfig, run_demo};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Gatehouse session service driver
#[derive(Parser, Debug)]
#[command(name = "gatehouse")]
#[command(about = "Runs a scripted login, betting and ban session")]
#[command(version)]
struct Args {
    /// Description of the bet placed by the regular user
    #[arg(short, long, default_value = "To me or to u")]
    bet: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&args.log_level)
            .map_err(|e| CliError::Config { reason: format!("log level: {e}") })?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(CliError::from)?;

    tracing::info!("Gatehouse session starting");

    let config = DemoConfig { bet: args.bet };
    let system = run_demo(&config);

    tracing::info!(
        admin = system.session().current_admin().unwrap_or("-"),
        regular_user = system.session().current_regular_user().unwrap_or("-"),
        "Session finished"
    );

    Ok(())
}

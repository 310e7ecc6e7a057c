//! Driver error types.

use thiserror::Error;

/// Errors that stop the driver before the session runs.
///
/// Data errors from the session itself are reported and never surface here.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration.
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

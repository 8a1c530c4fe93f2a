use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::ParseError};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set, otherwise `default_level` is used as the filter.
pub fn init_tracing(default_level: &str) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}

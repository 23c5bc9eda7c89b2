//! Logging subscriber initialisation.

use clap::Args;
use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error when a global subscriber is already installed.
    pub fn init(&self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .with(self.env_filter())
            .try_init()
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.clone()))
    }
}

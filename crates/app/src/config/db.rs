//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; required for remote carts
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

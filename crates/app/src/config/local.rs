//! Local Store Config

use std::path::PathBuf;

use clap::Args;

/// Anonymous cart-file settings.
#[derive(Debug, Args)]
pub struct LocalStoreConfig {
    /// Path of the anonymous cart file
    #[arg(long, env = "CART_FILE", default_value = "cart.json")]
    pub cart_file: PathBuf,
}

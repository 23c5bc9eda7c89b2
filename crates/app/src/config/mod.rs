//! Configuration

pub mod db;
pub mod local;
pub mod logging;

pub use db::DatabaseConfig;
pub use local::LocalStoreConfig;
pub use logging::LoggingConfig;

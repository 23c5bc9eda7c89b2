use clap::{Parser, Subcommand};

use inkcart_app::config::LoggingConfig;

mod cart;
mod db;

#[derive(Debug, Parser)]
#[command(name = "inkcart", about = "Inkcart cart administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        self.logging
            .init()
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

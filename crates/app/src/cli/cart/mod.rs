use clap::{Args, Subcommand};

mod add;
mod clear;
mod remove;
mod show;
mod target;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    Show(show::ShowArgs),
    Add(add::AddArgs),
    Remove(remove::RemoveArgs),
    Clear(clear::ClearArgs),
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show::run(args).await,
        CartSubcommand::Add(args) => add::run(args).await,
        CartSubcommand::Remove(args) => remove::run(args).await,
        CartSubcommand::Clear(args) => clear::run(args).await,
    }
}

/// Parses a `--variant axis=value` argument.
fn parse_variant(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(axis, value)| (axis.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected axis=value, got {raw:?}"))
}

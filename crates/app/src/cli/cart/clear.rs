use clap::Args;

use super::target::TargetArgs;

#[derive(Debug, Args)]
pub(crate) struct ClearArgs {
    #[command(flatten)]
    target: TargetArgs,
}

pub(crate) async fn run(args: ClearArgs) -> Result<(), String> {
    let mut store = args.target.open_store().await?;

    store
        .clear()
        .await
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    println!("cart: cleared");

    Ok(())
}

use clap::Args;

use inkcart_core::{LineKey, ProductId};

use super::{parse_variant, target::TargetArgs};

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Product identifier
    #[arg(long)]
    product_id: String,

    /// Variant selection of the line to remove, as axis=value; repeatable
    #[arg(long = "variant", value_parser = parse_variant)]
    variants: Vec<(String, String)>,

    /// Remove every variant of the product
    #[arg(long, conflicts_with = "variants")]
    all_variants: bool,
}

pub(crate) async fn run(args: RemoveArgs) -> Result<(), String> {
    let mut store = args.target.open_store().await?;

    let result = if args.all_variants {
        store
            .remove_product(&ProductId::new(args.product_id))
            .await
    } else {
        let key = LineKey::new(args.product_id, args.variants.into_iter().collect());

        store.remove_item(&key).await
    };

    result.map_err(|error| format!("failed to remove item: {error}"))?;

    println!("lines: {}", store.summary().lines);

    Ok(())
}

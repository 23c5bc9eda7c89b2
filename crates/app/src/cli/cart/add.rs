use clap::Args;

use inkcart_core::{LineItem, Price, ProductId, SupplierId};

use super::{parse_variant, target::TargetArgs};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Product identifier
    #[arg(long)]
    product_id: String,

    /// Display name snapshot
    #[arg(long)]
    name: String,

    /// Unit price in minor units
    #[arg(long)]
    price: u64,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Thumbnail URL
    #[arg(long)]
    image: Option<String>,

    /// Fulfilling supplier identifier
    #[arg(long)]
    supplier: Option<String>,

    /// Variant selection as axis=value; repeatable
    #[arg(long = "variant", value_parser = parse_variant)]
    variants: Vec<(String, String)>,
}

pub(crate) async fn run(args: AddArgs) -> Result<(), String> {
    let mut store = args.target.open_store().await?;

    let item = LineItem {
        product_id: ProductId::new(args.product_id),
        name: args.name,
        unit_price: Price::new(args.price),
        quantity: args.quantity,
        image: args.image,
        supplier_id: args.supplier.map(SupplierId::new),
        variants: args.variants.into_iter().collect(),
    };

    store
        .add_item(item)
        .await
        .map_err(|error| format!("failed to add item: {error}"))?;

    let summary = store.summary();

    println!("lines: {}", summary.lines);
    println!("total_minor: {}", *summary.total);

    Ok(())
}

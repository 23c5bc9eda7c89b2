use clap::Args;

use super::target::TargetArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    target: TargetArgs,
}

pub(crate) async fn run(args: ShowArgs) -> Result<(), String> {
    let store = args.target.open_store().await?;

    for item in store.items() {
        let variants = item
            .variants
            .iter()
            .map(|(axis, value)| format!("{axis}={value}"))
            .collect::<Vec<_>>()
            .join(",");

        println!(
            "{quantity} x {product} @ {price} {name} [{variants}]",
            quantity = item.quantity,
            product = item.product_id,
            price = *item.unit_price,
            name = item.name,
        );
    }

    let summary = store.summary();

    println!("lines: {}", summary.lines);
    println!("units: {}", summary.units);
    println!("total_minor: {}", *summary.total);

    Ok(())
}

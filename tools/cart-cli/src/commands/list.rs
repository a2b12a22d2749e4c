//! Show the cart contents.

use anyhow::Result;
use marketplace_cart::CartItem;

use super::ListArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await;
    let products = cart.products();

    let items: Vec<&CartItem> = products
        .iter()
        .filter(|item| !args.hide_empty || item.quantity > 0)
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    if items.is_empty() {
        ctx.output.info("Cart is empty.");
        ctx.output.info("Run `cart add` to put something in it.");
        return Ok(());
    }

    ctx.output.header("Cart");
    let widths = [12, 24, 10, 8];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "QTY"], &widths);
    for item in &items {
        let price = format_price(item.price);
        let quantity = item.quantity.to_string();
        ctx.output.table_row(
            &[item.id.as_str(), item.title.as_str(), price.as_str(), quantity.as_str()],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Entries", &products.len().to_string());
    ctx.output.kv("Units", &products.unit_count().to_string());

    Ok(())
}

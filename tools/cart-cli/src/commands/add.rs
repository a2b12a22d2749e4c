//! Add a product to the cart.

use anyhow::Result;
use marketplace_cart::{Product, ProductId};

use super::{settle, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await;
    let id = ProductId::new(args.id);
    let product = Product::new(id.clone(), args.title, args.image_url, args.price);

    settle(cart.add_to_cart(product), ctx).await?;

    let quantity = cart.products().quantity_of(&id);
    if ctx.output.is_json() {
        ctx.output.json(&cart.products().get(&id));
    } else {
        ctx.output
            .success(&format!("Added {} (quantity {})", id, quantity));
    }

    Ok(())
}

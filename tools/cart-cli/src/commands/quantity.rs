//! Adjust the quantity of an entry already in the cart.

use anyhow::Result;
use marketplace_cart::ProductId;

use super::{settle, QuantityArgs};
use crate::context::Context;

/// Direction of a quantity change.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Up,
    Down,
}

/// Run the increment or decrement command.
pub async fn run(args: QuantityArgs, step: Step, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await;
    let id = ProductId::new(args.id);

    let existed = cart.products().get(&id).is_some();
    if !existed {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }

    let write = match step {
        Step::Up => cart.increment(&id),
        Step::Down => cart.decrement(&id),
    };
    settle(write, ctx).await?;

    let products = cart.products();
    match products.get(&id) {
        Some(item) if ctx.output.is_json() => ctx.output.json(item),
        Some(item) => ctx
            .output
            .success(&format!("{} quantity is now {}", id, item.quantity)),
        None if ctx.output.is_json() => ctx.output.json(&serde_json::Value::Null),
        None if existed => ctx.output.success(&format!("Removed {} from the cart", id)),
        None => ctx.output.debug("Cart unchanged"),
    }

    Ok(())
}

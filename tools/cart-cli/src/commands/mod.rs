//! CLI command implementations.

pub mod add;
pub mod list;
pub mod quantity;

use anyhow::{bail, Result};
use clap::Args;
use marketplace_cart::{PendingWrite, WriteOutcome};

use crate::context::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Hide entries whose quantity is zero.
    #[arg(long)]
    pub hide_empty: bool,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product identifier.
    #[arg(long)]
    pub id: String,

    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Product image URL.
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Unit price.
    #[arg(long)]
    pub price: f64,
}

/// Arguments for the increment and decrement commands.
#[derive(Args)]
pub struct QuantityArgs {
    /// Product identifier.
    pub id: String,
}

/// Wait for a mutation's write so the storage file reflects the command.
async fn settle(write: PendingWrite, ctx: &Context) -> Result<()> {
    match write.wait().await {
        WriteOutcome::Written | WriteOutcome::Superseded => Ok(()),
        WriteOutcome::Failed => bail!(
            "Cart could not be saved to {}",
            ctx.storage_path().display()
        ),
    }
}

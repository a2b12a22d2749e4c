//! Cart CLI - inspect and edit a marketplace cart stored on disk.
//!
//! Commands:
//! - `cart list` - Show the cart
//! - `cart add` - Add one unit of a product
//! - `cart increment` - Add one unit of an entry
//! - `cart decrement` - Remove one unit of an entry

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::quantity::Step;
use commands::{AddArgs, ListArgs, QuantityArgs};

/// Cart CLI - inspect and edit a marketplace cart
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storage file path (overrides config)
    #[arg(short, long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents
    List(ListArgs),

    /// Add one unit of a product
    Add(AddArgs),

    /// Add one unit of an entry already in the cart
    Increment(QuantityArgs),

    /// Remove one unit of an entry already in the cart
    Decrement(QuantityArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("marketplace_cart={level},marketplace_kv={level}").into()
        }))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.store, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Increment(args) => commands::quantity::run(args, Step::Up, &ctx).await,
        Commands::Decrement(args) => commands::quantity::run(args, Step::Down, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

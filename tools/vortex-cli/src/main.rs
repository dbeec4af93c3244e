//! Vortex CLI - Command line shopping cart for the Vortex storefront.
//!
//! Commands:
//! - `vortex add` - Add one unit of a product
//! - `vortex remove` - Remove a product's line
//! - `vortex set` - Set a line's quantity
//! - `vortex inc` / `vortex dec` - Step a line's quantity
//! - `vortex empty` - Remove every line
//! - `vortex show` - Print the cart
//! - `vortex checkout` - Place an order
//! - `vortex config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vortex_cart::CartError;

use commands::{AddArgs, CheckoutArgs, ConfigArgs, LineArgs, SetArgs};

/// Vortex CLI - Keep a shopping cart and check it out
#[derive(Parser)]
#[command(name = "vortex")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(LineArgs),

    /// Set a product's quantity (1-5)
    Set(SetArgs),

    /// Add one more of a product already in the cart
    Inc(LineArgs),

    /// Take one away from a product already in the cart
    Dec(LineArgs),

    /// Remove everything from the cart
    Empty,

    /// Show the cart
    Show,

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = context::Context::load(cli.config.as_deref(), cli.verbose, cli.json)?;

    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Set(args) => commands::cart::set(args, &ctx),
        Commands::Inc(args) => commands::cart::increment(args, &ctx),
        Commands::Dec(args) => commands::cart::decrement(args, &ctx),
        Commands::Empty => commands::cart::empty(&ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        // Store rejections were already shown as notices, except in JSON mode
        let shown = ctx.output.shows_notices() && e.downcast_ref::<CartError>().is_some();
        if !shown {
            match e.downcast_ref::<CartError>() {
                Some(err) => ctx.output.json(&serde_json::json!({
                    "error": err.to_string(),
                    "kind": err.kind().as_str(),
                })),
                None => ctx.output.error(&format!("{:#}", e)),
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

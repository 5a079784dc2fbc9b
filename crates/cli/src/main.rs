//! Go Marketplace CLI - Cart inspection and editing tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! gm-cli cart show
//!
//! # Add a product (or bump its quantity)
//! gm-cli cart add --id 1 --title "Cadeira Rivatti" --image-url https://... --price 1400.90
//!
//! # Adjust quantities
//! gm-cli cart increment 1
//! gm-cli cart decrement 1
//!
//! # Use a different storage directory or key
//! gm-cli --storage-dir /tmp/gm --key @GoMarketplace cart show
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the cart contents and totals
//! - `cart add` - Add a product to the cart
//! - `cart increment` / `cart decrement` - Change a line's quantity

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use go_marketplace_cart::CartConfig;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "Go Marketplace CLI tools")]
struct Cli {
    /// Storage directory (overrides `GO_MARKETPLACE_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Storage key (overrides `GO_MARKETPLACE_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(short, long)]
        image_url: String,

        /// Unit price (e.g. 19.90)
        #[arg(short, long)]
        price: String,
    },
    /// Increase a product's quantity by one
    Increment {
        /// Product ID
        id: String,
    },
    /// Decrease a product's quantity by one (never below zero)
    Decrement {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cart=info,gm_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config = config.with_storage_dir(dir);
    }
    if let Some(key) = cli.key {
        config = config.with_cart_key(&key)?;
    }

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config).await?,
            CartAction::Add {
                id,
                title,
                image_url,
                price,
            } => commands::cart::add(&config, &id, title, image_url, &price).await?,
            CartAction::Increment { id } => commands::cart::increment(&config, &id).await?,
            CartAction::Decrement { id } => commands::cart::decrement(&config, &id).await?,
        },
    }
    Ok(())
}

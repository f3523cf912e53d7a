use clap::{Parser, Subcommand};
use std::path::PathBuf;
use commands::CartCommand;
use storefront_core::{BackendConfig, CartStore, Catalog, StoreConfig};
use tracing_subscriber::EnvFilter;

mod commands;

/// Storefront CLI - browse the catalog and manage the persisted cart
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep the cart as a JSON file in this directory
    #[arg(long, value_name = "DIR", conflicts_with = "db")]
    storage_dir: Option<PathBuf>,

    /// Keep the cart in this SQLite database
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Category slug (electronics, fashion, accessories, sale, mens, womens, kids)
        #[arg(long)]
        category: Option<String>,

        /// Output in JSON
        #[arg(long)]
        json: bool,
    },

    #[command(flatten)]
    Cart(CartCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let catalog = Catalog::builtin();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Catalog { category, json } => {
            commands::list_catalog(&catalog, category.as_deref(), json, &mut out)?;
        }
        Commands::Cart(command) => {
            let mut cart = CartStore::open(&config)?;
            commands::run(&mut cart, &catalog, command, &mut out)?;
            cart.flush()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };

    if let Some(dir) = &cli.storage_dir {
        config = config.with_backend(BackendConfig::File { dir: dir.clone() });
    }
    if let Some(path) = &cli.db {
        config = config.with_backend(BackendConfig::Sqlite { path: path.clone() });
    }

    tracing::debug!("Using store config: {:?}", config);
    Ok(config)
}

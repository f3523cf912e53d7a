//! Subcommand handlers
//!
//! Handlers write to any `io::Write` so tests can capture what the terminal
//! would show.

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;
use std::io::Write;
use storefront_core::{
    collection_title, format_price, CartItem, CartStore, Catalog, CatalogProduct, KeyValueStore,
};

/// Operations on the persisted cart
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a catalog product to the cart
    Add {
        /// Catalog product id
        id: String,
    },

    /// Remove a line from the cart
    Remove { id: String },

    /// Increase a line's quantity by one
    Inc { id: String },

    /// Decrease a line's quantity by one (stops at 1)
    Dec { id: String },

    /// Open or close the cart panel
    Toggle,

    /// Show the cart
    Show {
        /// Output in JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the persisted cart
    Reset,
}

/// JSON view of the cart
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary<'a> {
    items: &'a [CartItem],
    is_open: bool,
    total_items: u64,
    total_price: f64,
}

pub fn run<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    catalog: &Catalog,
    command: CartCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        CartCommand::Add { id } => add(cart, catalog, &id)?,
        CartCommand::Remove { id } => cart.remove_item(&id)?,
        CartCommand::Inc { id } => cart.increment_item(&id)?,
        CartCommand::Dec { id } => cart.decrement_item(&id)?,
        CartCommand::Toggle => cart.toggle_cart()?,
        CartCommand::Show { json } => return show(cart, json, out),
        CartCommand::Reset => cart.reset()?,
    }
    show(cart, false, out)
}

/// Unknown catalog ids stop here; the cart itself never sees them.
fn add<S: KeyValueStore>(cart: &mut CartStore<S>, catalog: &Catalog, id: &str) -> Result<()> {
    let Some(entry) = catalog.get(id) else {
        bail!("No product with id '{}' in the catalog", id);
    };
    cart.add_item(entry.to_product())?;
    Ok(())
}

pub fn show<S: KeyValueStore>(cart: &CartStore<S>, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        let summary = CartSummary {
            items: cart.items(),
            is_open: cart.is_open(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    let panel = if cart.is_open() { "open" } else { "closed" };
    writeln!(out, "Your Cart ({}) [{}]", cart.items().len(), panel)?;

    if cart.items().is_empty() {
        writeln!(out, "  Your cart is empty")?;
        return Ok(());
    }

    for item in cart.items() {
        writeln!(
            out,
            "  {} {:<32} {:>10}  x{}",
            item.product.image,
            item.product.name,
            format_price(item.product.price),
            item.quantity
        )?;
    }
    writeln!(out, "Items: {}", cart.total_items())?;
    writeln!(out, "Total {}", format_price(cart.total_price()))?;
    Ok(())
}

pub fn list_catalog(
    catalog: &Catalog,
    category: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let products = catalog.filter(category);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&products)?)?;
        return Ok(());
    }

    match category {
        Some(slug) => writeln!(out, "{}", collection_title(slug))?,
        None => writeln!(out, "Featured Products")?,
    }
    if products.is_empty() {
        writeln!(out, "  No products found")?;
    }
    for product in products {
        writeln!(out, "  {}", product_line(product))?;
    }
    Ok(())
}

fn product_line(p: &CatalogProduct) -> String {
    let mut line = format!(
        "[{}] {} {:<28} {:>8}",
        p.id,
        p.image,
        p.name,
        format_price(p.price)
    );
    if let (Some(original), Some(discount)) = (p.original_price, p.discount_percent()) {
        line.push_str(&format!(" (was {}, -{}%)", format_price(original), discount));
    }
    let stars: String = "★".repeat(p.full_stars() as usize);
    line.push_str(&format!("  {:<5} {} ({})", stars, p.rating, p.reviews));
    if let Some(badge) = p.badge {
        line.push_str(&format!("  {}", badge));
    }
    line
}

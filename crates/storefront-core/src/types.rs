//! Core value types shared by the cart and the catalog

use serde::{Deserialize, Serialize};

/// Identifier of a product as the cart sees it
pub type ProductId = String;

/// A product as supplied to the cart by a catalog caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique per catalog entry
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Image reference (URL or emoji glyph)
    pub image: String,
}

impl Product {
    /// Create a new product
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// One cart line: a product plus its quantity.
///
/// Serialized flat (`{id, name, price, image, quantity}`) so the persisted
/// snapshot keeps the layout the storefront has always written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always >= 1
    pub quantity: u32,
}

impl CartItem {
    /// A fresh line for `product` with quantity 1
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Product identifier of this line
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// `price * quantity`
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Format an amount the way the storefront displays prices (`$12.50`).
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

//! Catalog entries

use crate::types::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Department a product is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Fashion,
    Accessories,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Promotional label on a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    Sale,
    New,
    Hot,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Badge::Sale => "Sale",
            Badge::New => "New",
            Badge::Hot => "Hot",
        };
        f.write_str(label)
    }
}

/// A product as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: u32,
    pub name: String,
    pub price: f64,
    /// Price before discount, shown struck through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// 0.0 - 5.0
    pub rating: f32,
    pub reviews: u32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub category: Category,
}

impl CatalogProduct {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: f64,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            original_price: None,
            rating: 0.0,
            reviews: 0,
            image: image.into(),
            badge: None,
            category,
        }
    }

    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = Some(price);
        self
    }

    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// What the "Add to Cart" button hands to the cart
    pub fn to_product(&self) -> Product {
        Product::new(self.id.to_string(), self.name.clone(), self.price, self.image.clone())
    }

    /// Whole-percent saving against the original price
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price.filter(|o| *o > 0.0)?;
        Some(((original - self.price) / original * 100.0).round().max(0.0) as u32)
    }

    /// Number of filled stars on the card
    pub fn full_stars(&self) -> u32 {
        self.rating.clamp(0.0, 5.0).floor() as u32
    }
}

//! Product catalog
//!
//! The storefront ships a fixed list of products. Category pages narrow it with
//! a URL slug; see [`Catalog::filter`] for how slugs map onto products.

pub mod product;

pub use product::{Badge, CatalogProduct, Category};

use serde::{Deserialize, Serialize};

/// Slugs that the category pages treat as aliases for [`Category::Fashion`]
const FASHION_ALIASES: &[&str] = &["mens", "womens", "kids"];

/// Slug that selects every product badged [`Badge::Sale`]
const SALE_SLUG: &str = "sale";

/// An ordered list of products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// The eight products featured on the storefront
    pub fn builtin() -> Self {
        use Badge::*;
        use Category::*;

        let p = CatalogProduct::new;
        Self::new(vec![
            p(1, "Premium Wireless Headphones", 299.0, Electronics, "🎧")
                .with_original_price(399.0)
                .with_rating(4.8, 234)
                .with_badge(Sale),
            p(2, "Designer Leather Bag", 189.0, Fashion, "👜")
                .with_rating(4.9, 156)
                .with_badge(New),
            p(3, "Smart Watch Pro", 449.0, Electronics, "⌚")
                .with_original_price(549.0)
                .with_rating(4.7, 892)
                .with_badge(Hot),
            p(4, "Minimalist Sneakers", 129.0, Fashion, "👟").with_rating(4.6, 445),
            p(5, "Portable Speaker", 89.0, Electronics, "🔊")
                .with_original_price(129.0)
                .with_rating(4.5, 678)
                .with_badge(Sale),
            p(6, "Sunglasses Collection", 159.0, Fashion, "🕶️")
                .with_rating(4.8, 234)
                .with_badge(New),
            p(7, "Laptop Backpack", 79.0, Accessories, "🎒").with_rating(4.7, 567),
            p(8, "Wireless Earbuds", 149.0, Electronics, "🎵")
                .with_original_price(199.0)
                .with_rating(4.9, 1234)
                .with_badge(Hot),
        ])
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by its cart-facing id (`"3"`)
    pub fn get(&self, id: &str) -> Option<&CatalogProduct> {
        let id: u32 = id.trim().parse().ok()?;
        self.products.iter().find(|p| p.id == id)
    }

    /// Products shown on the page for `slug`.
    ///
    /// - no slug, or a blank one: everything
    /// - `sale`: products badged Sale
    /// - `mens`, `womens`, `kids`: Fashion
    /// - anything else: products whose category name matches, ignoring case
    pub fn filter(&self, slug: Option<&str>) -> Vec<&CatalogProduct> {
        let slug = match slug.map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_lowercase(),
            _ => return self.products.iter().collect(),
        };

        self.products
            .iter()
            .filter(|p| {
                if slug == SALE_SLUG {
                    p.badge == Some(Badge::Sale)
                } else if FASHION_ALIASES.contains(&slug.as_str()) {
                    p.category == Category::Fashion
                } else {
                    p.category.as_str().to_lowercase() == slug
                }
            })
            .collect()
    }
}

/// Heading of a category page: `"electronics"` → `"Electronics Collection"`
pub fn collection_title(slug: &str) -> String {
    let mut chars = slug.chars();
    let head: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} Collection", head)
}

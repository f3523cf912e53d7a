//! Cart State - the plain data behind the cart panel
//!
//! Every operation here is total: an id that is not in the cart leaves the
//! state untouched. Each mutation reports whether anything changed so callers
//! can log it; nothing treats `false` as an error.

use crate::types::{CartItem, Product};
use serde::{Deserialize, Serialize};

/// Line items plus the open/closed flag of the cart panel.
///
/// Fields missing from a stored snapshot take their defaults instead of
/// discarding the rest of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartState {
    /// Insertion order = order first added
    pub items: Vec<CartItem>,

    /// Cart panel visibility, closed by default
    pub is_open: bool,
}

impl CartState {
    /// Empty, closed cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart gets its quantity bumped; the existing
    /// line keeps its name, price and image even if `product` differs.
    /// Otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, product: Product) -> bool {
        match self.find_mut(&product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product)),
        }
        true
    }

    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != product_id);
        self.items.len() != before
    }

    pub fn increment_item(&mut self, product_id: &str) -> bool {
        match self.find_mut(product_id) {
            Some(item) if item.quantity < u32::MAX => {
                item.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Decrease quantity by one, stopping at 1. Removal only happens through
    /// [`CartState::remove_item`].
    pub fn decrement_item(&mut self, product_id: &str) -> bool {
        match self.find_mut(product_id) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_cart(&mut self) -> bool {
        self.is_open = !self.is_open;
        true
    }

    /// Sum of all quantities
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity`, unrounded
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == product_id)
    }
}

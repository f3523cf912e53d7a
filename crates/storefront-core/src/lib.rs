//! Storefront Core - cart state, catalog and local persistence
//!
//! The storefront keeps its shopping cart on the client: a short list of line
//! items and an open/closed flag for the cart panel, mirrored into a single
//! key-value slot so it survives a restart.
//!
//! # Architecture
//!
//! 1. **Cart** (`cart`): [`CartState`] operations and the persisted [`CartStore`]
//! 2. **Storage** (`storage`): the [`KeyValueStore`] slot and its backends
//! 3. **Catalog** (`catalog`): the product list and category filtering
//! 4. **Config** (`config`): backend and persistence settings
//!
//! # Quick Start
//!
//! ```
//! use storefront_core::storage::MemoryStore;
//! use storefront_core::{CartStore, Catalog};
//!
//! let catalog = Catalog::builtin();
//! let mut cart = CartStore::load(MemoryStore::new()).unwrap();
//!
//! let headphones = catalog.get("1").unwrap().to_product();
//! cart.add_item(headphones.clone()).unwrap();
//! cart.add_item(headphones).unwrap();
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), 598.0);
//!
//! // Quantities never drop below one; removal is explicit.
//! cart.decrement_item("1").unwrap();
//! cart.decrement_item("1").unwrap();
//! assert_eq!(cart.items()[0].quantity, 1);
//! cart.remove_item("1").unwrap();
//! assert!(cart.items().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, clippy::all)]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types for convenience
pub use cart::{CartState, CartStore, PersistedCart};
pub use catalog::{collection_title, Badge, Catalog, CatalogProduct, Category};
pub use config::{BackendConfig, PersistMode, StoreConfig};
pub use error::{Result, StorefrontError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
pub use types::{format_price, CartItem, Product, ProductId};

/// Name of the slot the cart is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Cart Store - the cart state plus its durable mirror
//!
//! A `CartStore` owns a [`CartState`] and a [`KeyValueStore`] slot. It is
//! restored from the slot when constructed and writes a whole-state snapshot
//! back after mutations, either right away or on [`CartStore::flush`] depending
//! on [`PersistMode`].

use super::{snapshot, CartState};
use crate::config::{PersistMode, StoreConfig};
use crate::error::{Result, ResultExt};
use crate::storage::{validate_key, KeyValueStore};
use crate::types::{CartItem, Product};
use crate::DEFAULT_STORAGE_KEY;

/// Authoritative cart for one session
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    state: CartState,
    storage: S,
    key: String,
    mode: PersistMode,
    dirty: bool,
}

impl CartStore<Box<dyn KeyValueStore>> {
    /// Open the backend named by `config` and restore the cart from it
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let storage = config.open_backend()?;
        Self::with_options(storage, config.storage_key.clone(), config.persist_mode)
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore from `storage` under the default key, persisting immediately
    pub fn load(storage: S) -> Result<Self> {
        Self::with_options(storage, DEFAULT_STORAGE_KEY, PersistMode::Immediate)
    }

    /// Restore from `storage` under `key`.
    ///
    /// A missing or unreadable snapshot yields an empty, closed cart. Only a
    /// failing backend is an error.
    pub fn with_options(storage: S, key: impl Into<String>, mode: PersistMode) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;

        let raw = storage
            .get(&key)
            .with_context(|| format!("Loading cart from '{}'", key))?;
        let state = raw.as_deref().and_then(snapshot::decode).unwrap_or_default();

        tracing::info!(
            "Cart restored from '{}': {} lines, {} items",
            key,
            state.items.len(),
            state.total_items()
        );

        Ok(Self {
            state,
            storage,
            key,
            mode,
            dirty: false,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_item(&mut self, product: Product) -> Result<()> {
        tracing::debug!("add_item {}", product.id);
        self.state.add_item(product);
        self.commit()
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<()> {
        if !self.state.remove_item(product_id) {
            tracing::debug!("remove_item {}: not in cart", product_id);
        }
        self.commit()
    }

    pub fn increment_item(&mut self, product_id: &str) -> Result<()> {
        if !self.state.increment_item(product_id) {
            tracing::debug!("increment_item {}: not in cart", product_id);
        }
        self.commit()
    }

    /// Stops at quantity 1; use [`CartStore::remove_item`] to drop a line.
    pub fn decrement_item(&mut self, product_id: &str) -> Result<()> {
        if !self.state.decrement_item(product_id) {
            tracing::debug!("decrement_item {}: absent or at minimum", product_id);
        }
        self.commit()
    }

    pub fn toggle_cart(&mut self) -> Result<()> {
        self.state.toggle_cart();
        tracing::debug!("toggle_cart -> open={}", self.state.is_open);
        self.commit()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    pub fn total_price(&self) -> f64 {
        self.state.total_price()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// True when memory holds changes the backend has not seen
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the current snapshot if anything is pending
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let raw = snapshot::encode(&self.state)?;
        self.storage
            .set(&self.key, &raw)
            .with_context(|| format!("Persisting cart to '{}'", self.key))?;
        self.dirty = false;

        tracing::info!("Cart persisted to '{}' ({} bytes)", self.key, raw.len());
        Ok(())
    }

    /// Forget the persisted slot and start over with an empty, closed cart
    pub fn reset(&mut self) -> Result<()> {
        self.state = CartState::default();
        self.dirty = false;
        self.storage
            .remove(&self.key)
            .with_context(|| format!("Removing cart slot '{}'", self.key))?;
        tracing::info!("Cart slot '{}' cleared", self.key);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.dirty = true;
        match self.mode {
            PersistMode::Immediate => self.flush(),
            PersistMode::Deferred => Ok(()),
        }
    }
}

impl<S: KeyValueStore> Drop for CartStore<S> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Cart snapshot lost on drop: {}", e);
        }
    }
}

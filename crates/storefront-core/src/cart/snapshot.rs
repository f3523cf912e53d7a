//! Persisted form of the cart
//!
//! The slot holds `{"state": {"items": [...], "isOpen": false}, "version": 0}`,
//! the envelope the storefront's browser build has always written.

use super::CartState;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Version stamped into every snapshot
pub const STORAGE_VERSION: u32 = 0;

/// Versioned envelope around a [`CartState`].
///
/// Encoding wraps a borrowed `&CartState`; decoding yields an owned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedCart<S = CartState> {
    pub state: S,
    pub version: u32,
}

impl<S> PersistedCart<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            version: STORAGE_VERSION,
        }
    }
}

/// Serialize a state snapshot for the storage slot
pub fn encode(state: &CartState) -> Result<String> {
    Ok(serde_json::to_string(&PersistedCart::new(state))?)
}

/// Restore a state snapshot.
///
/// Returns `None` for corrupt JSON, a different version, or a snapshot that
/// breaks the cart invariants (zero quantities, duplicate ids).
pub fn decode(raw: &str) -> Option<CartState> {
    let persisted: PersistedCart<CartState> = match serde_json::from_str(raw) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Discarding unreadable cart snapshot: {}", e);
            return None;
        }
    };

    if persisted.version != STORAGE_VERSION {
        tracing::warn!(
            "Discarding cart snapshot with version {} (expected {})",
            persisted.version,
            STORAGE_VERSION
        );
        return None;
    }

    let state = persisted.state;
    let mut seen = std::collections::HashSet::new();
    for item in &state.items {
        if item.quantity == 0 || !seen.insert(item.id()) {
            tracing::warn!("Discarding cart snapshot with invalid line '{}'", item.id());
            return None;
        }
    }

    Some(state)
}

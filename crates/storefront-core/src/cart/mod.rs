//! Shopping cart
//!
//! - [`CartState`]: line items and the panel flag, pure operations
//! - [`CartStore`]: a `CartState` bound to a persistent slot
//! - [`snapshot`]: the versioned JSON envelope written to that slot

pub mod snapshot;
pub mod state;
pub mod store;

pub use snapshot::{PersistedCart, STORAGE_VERSION};
pub use state::CartState;
pub use store::CartStore;

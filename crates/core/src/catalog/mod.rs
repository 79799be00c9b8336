//! Card catalog and set registry.
//!
//! Two persisted collections back the catalog: the ordered list of scraped
//! cards and the registry of source sets. Both live behind [`CatalogStore`];
//! [`CatalogManager`] keeps an in-memory snapshot for lookups.

mod manager;
mod store;
mod types;

pub use manager::{CatalogManager, CatalogSnapshot};
pub use store::JsonCatalogStore;
pub use types::*;

/// Trait for catalog persistence.
pub trait CatalogStore: Send + Sync {
    /// Load the set registry. A missing file is an empty registry.
    fn load_sets(&self) -> Result<Vec<CardSet>, CatalogError>;

    /// Load the card catalog. A missing file is an empty catalog.
    fn load_cards(&self) -> Result<Vec<Card>, CatalogError>;

    /// Persist both collections after a set run.
    ///
    /// The catalog is written before the registry so a set is never marked
    /// scraped without its cards on disk.
    fn commit(&self, sets: &[CardSet], cards: &[Card]) -> Result<(), CatalogError>;

    /// Persist the registry alone.
    fn save_sets(&self, sets: &[CardSet]) -> Result<(), CatalogError>;
}

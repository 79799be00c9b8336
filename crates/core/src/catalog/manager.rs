//! In-memory catalog snapshot shared by lookups and the sync orchestrator.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{Card, CardSet, CatalogError, CatalogStats, CatalogStore};

/// Immutable view of the catalog at one point in time.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub sets: Vec<CardSet>,
    pub cards: Vec<Card>,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    fn new(sets: Vec<CardSet>, cards: Vec<Card>) -> Self {
        Self {
            sets,
            cards,
            loaded_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            cards: self.cards.len(),
            sets: self.sets.len(),
            scraped_sets: self.sets.iter().filter(|s| s.scraped).count(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Owns the catalog store and publishes snapshots.
///
/// Readers clone an `Arc` of the current snapshot and never block writers.
/// Writers serialize on an async mutex, persist through the store, and only
/// publish the new snapshot once the store accepted it.
pub struct CatalogManager {
    store: Box<dyn CatalogStore>,
    current: RwLock<Arc<CatalogSnapshot>>,
    write_lock: Mutex<()>,
}

impl CatalogManager {
    /// Load both files from the store and build the first snapshot.
    pub fn open(store: Box<dyn CatalogStore>) -> Result<Self, CatalogError> {
        let snapshot = Self::load(store.as_ref())?;
        info!(
            cards = snapshot.cards.len(),
            sets = snapshot.sets.len(),
            "Catalog loaded"
        );
        Ok(Self {
            store,
            current: RwLock::new(Arc::new(snapshot)),
            write_lock: Mutex::new(()),
        })
    }

    fn load(store: &dyn CatalogStore) -> Result<CatalogSnapshot, CatalogError> {
        Ok(CatalogSnapshot::new(store.load_sets()?, store.load_cards()?))
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn publish(&self, snapshot: CatalogSnapshot) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(snapshot);
    }

    /// Re-read both files, replacing the in-memory snapshot.
    pub async fn reload(&self) -> Result<CatalogStats, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = Self::load(self.store.as_ref())?;
        let stats = snapshot.stats();
        self.publish(snapshot);
        info!(cards = stats.cards, sets = stats.sets, "Catalog reloaded");
        Ok(stats)
    }

    pub fn list_sets(&self) -> Vec<CardSet> {
        self.snapshot().sets.clone()
    }

    pub fn stats(&self) -> CatalogStats {
        self.snapshot().stats()
    }

    /// Register a new unscraped set. Names are unique.
    pub async fn add_set(&self, set: CardSet) -> Result<CardSet, CatalogError> {
        set.validate()?;
        let set = CardSet {
            scraped: false,
            ..set
        };

        let _guard = self.write_lock.lock().await;
        let current = self.snapshot();
        if current.sets.iter().any(|s| s.name == set.name) {
            return Err(CatalogError::DuplicateSet(set.name));
        }

        let mut sets = current.sets.clone();
        sets.push(set.clone());
        self.store.save_sets(&sets)?;

        self.publish(CatalogSnapshot::new(sets, current.cards.clone()));
        info!(set = %set.name, length = set.length, "Set registered");
        Ok(set)
    }

    /// Append the cards of one completed set run and mark the set scraped.
    ///
    /// The snapshot is re-read under the write lock so sets registered while
    /// the run was in flight are kept. On a store failure nothing is published
    /// and the set stays unscraped.
    pub async fn merge_set_run(
        &self,
        set_name: &str,
        cards: Vec<Card>,
    ) -> Result<(), CatalogError> {
        let _guard = self.write_lock.lock().await;
        let current = self.snapshot();

        let mut sets = current.sets.clone();
        let set = sets
            .iter_mut()
            .find(|s| s.name == set_name)
            .ok_or_else(|| CatalogError::SetNotFound(set_name.to_string()))?;
        set.scraped = true;

        let added = cards.len();
        let mut all_cards = current.cards.clone();
        all_cards.extend(cards);

        self.store.commit(&sets, &all_cards)?;
        debug!(set = set_name, added, total = all_cards.len(), "Set run committed");

        self.publish(CatalogSnapshot::new(sets, all_cards));
        Ok(())
    }
}

//! In-memory catalog store for testing.

use std::sync::{Arc, Mutex};

use crate::catalog::{Card, CardSet, CatalogError, CatalogStore};

#[derive(Default)]
struct StoreState {
    sets: Vec<CardSet>,
    cards: Vec<Card>,
    fail_writes: bool,
    commits: usize,
}

/// Catalog store kept in memory. Clones share the same data, so a test can
/// hand one clone to the catalog and inspect or sabotage it through another.
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(sets: Vec<CardSet>, cards: Vec<Card>) -> Self {
        let store = Self::new();
        store.replace(sets, cards);
        store
    }

    /// Overwrite the persisted data, as another process editing the files would.
    pub fn replace(&self, sets: Vec<CardSet>, cards: Vec<Card>) {
        let mut state = self.state.lock().unwrap();
        state.sets = sets;
        state.cards = cards;
    }

    /// Make every write fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub fn sets(&self) -> Vec<CardSet> {
        self.state.lock().unwrap().sets.clone()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.state.lock().unwrap().cards.clone()
    }

    /// Number of successful commits.
    pub fn commit_count(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    fn check_writable(state: &StoreState) -> Result<(), CatalogError> {
        if state.fail_writes {
            return Err(CatalogError::Io {
                path: "memory".to_string(),
                message: "simulated write failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load_sets(&self) -> Result<Vec<CardSet>, CatalogError> {
        Ok(self.sets())
    }

    fn load_cards(&self) -> Result<Vec<Card>, CatalogError> {
        Ok(self.cards())
    }

    fn commit(&self, sets: &[CardSet], cards: &[Card]) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.cards = cards.to_vec();
        state.sets = sets.to_vec();
        state.commits += 1;
        Ok(())
    }

    fn save_sets(&self, sets: &[CardSet]) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state)?;
        state.sets = sets.to_vec();
        Ok(())
    }
}

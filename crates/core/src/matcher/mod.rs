//! Fuzzy card-name matching.

mod normalize;
mod similarity;

pub use normalize::{normalize, NormalizedName};
pub use similarity::similarity;

use crate::catalog::Card;

/// Default similarity a card name needs to match a query.
pub const DEFAULT_THRESHOLD: f64 = 0.9;

/// Matches queries against card names by gestalt similarity of their
/// normalized keys.
#[derive(Debug, Clone, Copy)]
pub struct CardMatcher {
    threshold: f64,
}

impl Default for CardMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl CardMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity of a card name to an already-normalized query.
    ///
    /// A query without a rank suffix is also compared against the card's
    /// base name, so it reaches every rank of that card.
    pub fn score(&self, query: &NormalizedName, card_name: &str) -> f64 {
        let name = NormalizedName::parse(card_name);
        let full = similarity(&name.key(), &query.key());

        if query.suffix.is_none() && name.suffix.is_some() {
            full.max(similarity(&name.base, &query.base))
        } else {
            full
        }
    }

    /// Cards matching `query`, in catalog order.
    ///
    /// A query that normalizes to nothing matches nothing.
    pub fn find_matches(&self, cards: &[Card], query: &str) -> Vec<Card> {
        let query = NormalizedName::parse(query);
        if query.is_empty() {
            return Vec::new();
        }

        cards
            .iter()
            .filter(|card| self.score(&query, &card.name) >= self.threshold)
            .cloned()
            .collect()
    }
}

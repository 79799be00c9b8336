//! Types for the card catalog and the set registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A scraped card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Display name after cleanup (e.g. "Charizard EX").
    pub name: String,
    /// Absolute image URL.
    pub image: String,
}

impl Card {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// A source set: a numbered run of card pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    pub name: String,
    /// Page URLs are this prefix + zero-padded index + page suffix.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Number of pages, indexed 1..=length.
    pub length: u32,
    /// Flips to true once, after the whole run has been attempted and merged.
    #[serde(default)]
    pub scraped: bool,
}

impl CardSet {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, length: u32) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            length,
            scraped: false,
        }
    }

    /// URL of the page at `index` (1-based).
    pub fn page_url(&self, index: u32, suffix: &str) -> String {
        format!("{}{:03}{}", self.base_url, index, suffix)
    }

    /// Check the fields an operator supplies when registering a set.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidSet("name cannot be empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidSet(
                "baseURL cannot be empty".to_string(),
            ));
        }
        if self.length == 0 {
            return Err(CatalogError::InvalidSet(
                "length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Catalog statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub cards: usize,
    pub sets: usize,
    pub scraped_sets: usize,
    /// When the in-memory snapshot was built.
    pub loaded_at: DateTime<Utc>,
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed data in {path}: {message}")]
    Format { path: String, message: String },

    #[error("Invalid set: {0}")]
    InvalidSet(String),

    #[error("Set already registered: {0}")]
    DuplicateSet(String),

    #[error("Set not found: {0}")]
    SetNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_is_zero_padded() {
        let set = CardSet::new("Base", "https://x/base/", 102);
        assert_eq!(set.page_url(1, ".shtml"), "https://x/base/001.shtml");
        assert_eq!(set.page_url(42, ".shtml"), "https://x/base/042.shtml");
        assert_eq!(set.page_url(102, ".shtml"), "https://x/base/102.shtml");
    }

    #[test]
    fn test_set_serializes_with_base_url_key() {
        let set = CardSet::new("Base", "https://x/base/", 3);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["baseURL"], "https://x/base/");
        assert_eq!(json["scraped"], false);
    }

    #[test]
    fn test_set_scraped_defaults_to_false() {
        let json = r#"{"name": "Jungle", "baseURL": "https://x/jungle/", "length": 64}"#;
        let set: CardSet = serde_json::from_str(json).unwrap();
        assert!(!set.scraped);
        assert_eq!(set.length, 64);
    }

    #[test]
    fn test_validate_set() {
        assert!(CardSet::new("Base", "https://x/", 1).validate().is_ok());
        assert!(matches!(
            CardSet::new(" ", "https://x/", 1).validate(),
            Err(CatalogError::InvalidSet(_))
        ));
        assert!(matches!(
            CardSet::new("Base", "", 1).validate(),
            Err(CatalogError::InvalidSet(_))
        ));
        assert!(matches!(
            CardSet::new("Base", "https://x/", 0).validate(),
            Err(CatalogError::InvalidSet(_))
        ));
    }
}

//! JSON file-backed catalog storage.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Card, CardSet, CatalogError, CatalogStore};

/// Catalog store keeping the card catalog and the set registry in two JSON files.
///
/// Every write goes to a sibling temp file that is synced and then renamed
/// over the target, so readers never observe a half-written file.
pub struct JsonCatalogStore {
    catalog_path: PathBuf,
    sets_path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(catalog_path: impl Into<PathBuf>, sets_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            sets_path: sets_path.into(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn sets_path(&self) -> &Path {
        &self.sets_path
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load_sets(&self) -> Result<Vec<CardSet>, CatalogError> {
        read_json_or_default(&self.sets_path)
    }

    fn load_cards(&self) -> Result<Vec<Card>, CatalogError> {
        read_json_or_default(&self.catalog_path)
    }

    fn commit(&self, sets: &[CardSet], cards: &[Card]) -> Result<(), CatalogError> {
        // Catalog first: a crash between the renames leaves the set unscraped,
        // and the next sync re-scrapes it.
        write_json_atomic(&self.catalog_path, cards)?;
        write_json_atomic(&self.sets_path, sets)
    }

    fn save_sets(&self, sets: &[CardSet]) -> Result<(), CatalogError> {
        write_json_atomic(&self.sets_path, sets)
    }
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// A missing file reads as empty.
fn read_json_or_default<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| CatalogError::Format {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let json = serde_json::to_vec_pretty(value).map_err(|e| CatalogError::Format {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonCatalogStore {
        JsonCatalogStore::new(dir.path().join("cards.json"), dir.path().join("sets.json"))
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load_sets().unwrap().is_empty());
        assert!(store.load_cards().unwrap().is_empty());
    }

    #[test]
    fn test_commit_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut set = CardSet::new("Base", "https://x/base/", 2);
        set.scraped = true;
        let cards = vec![Card::new("Pikachu", "https://x/img/pikachu.jpg")];

        store.commit(&[set.clone()], &cards).unwrap();

        assert_eq!(store.load_sets().unwrap(), vec![set]);
        assert_eq!(store.load_cards().unwrap(), cards);
        assert!(!dir.path().join("cards.json.tmp").exists());
        assert!(!dir.path().join("sets.json.tmp").exists());
    }

    #[test]
    fn test_files_use_external_field_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save_sets(&[CardSet::new("Base", "https://x/base/", 2)])
            .unwrap();

        let raw = fs::read_to_string(store.sets_path()).unwrap();
        assert!(raw.contains("\"baseURL\""));
        assert!(raw.contains("\"scraped\": false"));
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.catalog_path(), "{not json").unwrap();

        assert!(matches!(
            store.load_cards(),
            Err(CatalogError::Format { .. })
        ));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::new(
            dir.path().join("data/cards.json"),
            dir.path().join("data/sets.json"),
        );

        store.commit(&[], &[]).unwrap();
        assert!(dir.path().join("data/cards.json").exists());
    }
}

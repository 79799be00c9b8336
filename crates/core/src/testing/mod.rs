//! Testing utilities and mock implementations.
//!
//! This module provides a mock page fetcher, an in-memory catalog store and
//! HTML fixtures, so sync and lookup flows run without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use cardex_core::testing::{fixtures, MemoryCatalogStore, MockFetcher};
//!
//! let store = MemoryCatalogStore::with_data(vec![fixtures::card_set("Base", 3)], vec![]);
//! let fetcher = MockFetcher::new();
//! let page = fixtures::card_page("Charizard", "/c/4.jpg");
//! fetcher.set_page(fixtures::page_url("Base", 1), page).await;
//! ```

mod memory_store;
mod mock_fetcher;

pub use memory_store::MemoryCatalogStore;
pub use mock_fetcher::MockFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::CardSet;

    /// Origin used by fixture sets.
    pub const ORIGIN: &str = "https://cards.test";

    /// Base URL of the fixture set called `name`.
    pub fn base_url(name: &str) -> String {
        format!("{}/card/{}/", ORIGIN, name.to_lowercase().replace(' ', "-"))
    }

    /// Unscraped set with `length` pages.
    pub fn card_set(name: &str, length: u32) -> CardSet {
        CardSet::new(name, base_url(name), length)
    }

    /// Page URL of the fixture set called `name`, with the default suffix.
    pub fn page_url(name: &str, index: u32) -> String {
        format!("{}{:03}.shtml", base_url(name), index)
    }

    /// Card page with the name in the `td.main` cell.
    pub fn card_page(name: &str, image_src: &str) -> String {
        format!(
            r#"<html><body><div id="content">
<table class="tcgtable"><tr>
  <td class="foocard"><img src="{image_src}" /></td>
  <td class="main"><b>{name}</b></td>
</tr></table>
</div></body></html>"#
        )
    }

    /// Card page whose `td.main` cell is empty apart from an image with `alt` text.
    pub fn alt_name_page(alt: &str, image_src: &str) -> String {
        format!(
            r#"<html><body>
<table class="tcgtable"><tr>
  <td class="foocard"><img src="{image_src}" /></td>
  <td class="main"><img src="/card/icon.png" alt="{alt}" /></td>
</tr></table>
</body></html>"#
        )
    }

    /// Older layout: no `td.main`, the name is the second row of the info table.
    pub fn info_table_page(name: &str, image_src: &str) -> String {
        format!(
            r#"<html><body>
<table class="tcgtable"><tr>
  <td class="foocard"><img src="{image_src}" /></td>
  <td class="cardinfo"><table>
    <tr><td>Card Name</td></tr>
    <tr><td>{name}</td></tr>
  </table></td>
</tr></table>
</body></html>"#
        )
    }

    /// Page without a card container, e.g. a gap in the numbering.
    pub fn empty_page() -> String {
        r#"<html><body><p>This card is not available.</p></body></html>"#.to_string()
    }
}

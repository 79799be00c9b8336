//! Card extraction from raw page markup.
//!
//! A card page holds one `table.tcgtable` container. The image sits in
//! `td.foocard`; the name has moved around over the source's history, so it
//! is looked up through an ordered list of layouts:
//!
//! 1. the `td.main` text cell
//! 2. an `img[alt]` of the form `#<number> <name>` when `td.main` is empty
//! 3. the second row of the table nested in `td.cardinfo` when `td.main` is missing

mod clean;

pub use clean::clean_card_name;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::catalog::Card;

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse("table.tcgtable").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("td.foocard img[src]").unwrap());
static MAIN_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td.main").unwrap());
static ALT_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img[alt]").unwrap());
static INFO_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.cardinfo table tr").unwrap());
static NUMBERED_ALT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\d+\s+(.+)$").unwrap());

/// Turns a card page into a [`Card`].
#[derive(Debug, Clone)]
pub struct CardExtractor {
    base_origin: String,
}

impl CardExtractor {
    /// `base_origin` resolves relative image references (e.g. `https://www.serebii.net`).
    pub fn new(base_origin: impl Into<String>) -> Self {
        Self {
            base_origin: base_origin.into(),
        }
    }

    /// Extract the card on this page, or `None` when the page is not a card.
    pub fn extract(&self, markup: &str) -> Option<Card> {
        let document = Html::parse_document(markup);
        let container = document.select(&CONTAINER).next()?;

        let Some(src) = container
            .select(&IMAGE)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())
        else {
            debug!("Card container has no image reference");
            return None;
        };

        let Some(raw_name) = extract_name(container) else {
            debug!(image = src, "Card container has no recognizable name");
            return None;
        };

        let name = clean_card_name(&raw_name);
        if name.is_empty() {
            debug!(raw = %raw_name, "Card name is empty after cleanup");
            return None;
        }

        let image = self.absolute_url(src)?;
        Some(Card { name, image })
    }

    fn absolute_url(&self, src: &str) -> Option<String> {
        if let Ok(url) = Url::parse(src) {
            return Some(url.to_string());
        }

        match Url::parse(&self.base_origin).and_then(|base| base.join(src)) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!(src, origin = %self.base_origin, error = %e, "Cannot resolve image URL");
                None
            }
        }
    }
}

fn extract_name(container: ElementRef<'_>) -> Option<String> {
    match container.select(&MAIN_CELL).next() {
        Some(main) => {
            let text = joined_text(main);
            if !text.is_empty() {
                return Some(text);
            }
            alt_name(main).or_else(|| alt_name(container))
        }
        None => container
            .select(&INFO_ROWS)
            .nth(1)
            .map(joined_text)
            .filter(|text| !text.is_empty()),
    }
}

/// Name from the first `#<number> <name>` image alt text under `scope`.
fn alt_name(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&ALT_IMAGE)
        .filter_map(|img| img.value().attr("alt"))
        .find_map(|alt| {
            NUMBERED_ALT
                .captures(alt.trim())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
}

fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

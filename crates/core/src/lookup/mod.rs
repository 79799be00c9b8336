//! `[[Name]]` lookups in free text.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

use crate::catalog::Card;
use crate::matcher::CardMatcher;
use crate::metrics;
use crate::pagination::{page_view, PageView};

/// Cap on images in a grouped reply.
pub const DEFAULT_MAX_GROUP: usize = 10;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// Card names wrapped in `[[...]]`, trimmed and lowercased, without
/// duplicates and in order of first appearance.
pub fn extract_markers(text: &str) -> Vec<String> {
    let mut markers: Vec<String> = Vec::new();
    for caps in MARKER.captures_iter(text) {
        let Some(inner) = caps.get(1) else { continue };
        let marker = inner.as_str().trim().to_lowercase();
        if !marker.is_empty() && !markers.contains(&marker) {
            markers.push(marker);
        }
    }
    markers
}

pub fn has_markers(text: &str) -> bool {
    !extract_markers(text).is_empty()
}

/// Reply to a lookup message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LookupReply {
    NoMatch,
    /// One query with exactly one match.
    Single { card: Card },
    /// One query with several matches, showing the first.
    Paged(PageView),
    /// First match of each resolved query.
    Group { cards: Vec<Card> },
}

impl LookupReply {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupReply::NoMatch => "no_match",
            LookupReply::Single { .. } => "single",
            LookupReply::Paged(_) => "paged",
            LookupReply::Group { .. } => "group",
        }
    }
}

/// Resolve every marker in `text` against `cards`.
pub fn lookup(
    cards: &[Card],
    matcher: &CardMatcher,
    text: &str,
    requester_id: &str,
    max_group: usize,
) -> LookupReply {
    let mut resolved: Vec<(String, Vec<Card>)> = Vec::new();
    for query in extract_markers(text) {
        let matches = matcher.find_matches(cards, &query);
        metrics::MATCHES_PER_QUERY.observe(matches.len() as f64);
        if !matches.is_empty() {
            resolved.push((query, matches));
        }
    }

    let reply = match resolved.len() {
        0 => LookupReply::NoMatch,
        1 => {
            let (query, mut matches) = resolved.remove(0);
            if matches.len() == 1 {
                LookupReply::Single {
                    card: matches.remove(0),
                }
            } else {
                match page_view(&matches, &query, 0, requester_id) {
                    Some(view) => LookupReply::Paged(view),
                    None => LookupReply::NoMatch,
                }
            }
        }
        _ => LookupReply::Group {
            cards: resolved
                .into_iter()
                .filter_map(|(_, matches)| matches.into_iter().next())
                .take(max_group)
                .collect(),
        },
    };

    metrics::LOOKUPS.with_label_values(&[reply.kind()]).inc();
    reply
}

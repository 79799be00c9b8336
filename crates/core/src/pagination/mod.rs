//! Stepping through several matches for one query.
//!
//! No session state is kept: each button carries a [`PageToken`], and a press
//! re-runs the query against the current catalog.

mod token;

pub use token::{PageToken, TokenError};

use serde::Serialize;
use tracing::debug;

use crate::catalog::Card;
use crate::matcher::CardMatcher;

/// One button of the page selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageButton {
    /// 1-based position shown to the user.
    pub label: String,
    pub token: String,
    pub current: bool,
}

/// A card shown with a selector over every match of its query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub card: Card,
    pub index: usize,
    pub total: usize,
    pub buttons: Vec<PageButton>,
}

/// View of `matches[index]`, or `None` when `index` is out of range.
pub fn page_view(
    matches: &[Card],
    query: &str,
    index: usize,
    requester_id: &str,
) -> Option<PageView> {
    let card = matches.get(index)?.clone();

    let buttons = (0..matches.len())
        .map(|i| PageButton {
            label: (i + 1).to_string(),
            token: PageToken::new(query, i, requester_id).encode(),
            current: i == index,
        })
        .collect();

    Some(PageView {
        card,
        index,
        total: matches.len(),
        buttons,
    })
}

/// Handle a button press.
///
/// Returns `None` when the press should be ignored: the token is malformed,
/// it belongs to someone else, or the catalog changed and the index no longer
/// exists.
pub fn step(
    cards: &[Card],
    matcher: &CardMatcher,
    token: &str,
    presser_id: &str,
) -> Option<PageView> {
    let token = match PageToken::decode(token) {
        Ok(token) => token,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed page token");
            return None;
        }
    };

    if token.requester_id != presser_id {
        debug!(
            requester = %token.requester_id,
            presser = presser_id,
            "Ignoring page press from another user"
        );
        return None;
    }

    let matches = matcher.find_matches(cards, &token.query);
    let view = page_view(&matches, &token.query, token.index, &token.requester_id);
    if view.is_none() {
        debug!(
            index = token.index,
            total = matches.len(),
            "Ignoring stale page token"
        );
    }
    view
}

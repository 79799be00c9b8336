//! Canonical comparison keys for card names.

use std::fmt;

/// Rank suffixes that survive normalization.
const RANK_SUFFIXES: [&str; 2] = ["EX", "GX"];

/// A card name split into its comparable base and optional rank suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// Lowercased, punctuation-free, whitespace-collapsed base.
    pub base: String,
    /// Uppercased rank suffix, if the name carried one.
    pub suffix: Option<&'static str>,
}

impl NormalizedName {
    pub fn parse(name: &str) -> Self {
        let mut tokens: Vec<&str> = name.split_whitespace().collect();
        let mut suffix = None;

        if let Some(last) = tokens.last().copied() {
            if let Some(rank) = rank_suffix(last) {
                suffix = Some(rank);
                tokens.pop();
            } else if let Some((word, tail)) = last.rsplit_once('-') {
                if let Some(rank) = rank_suffix(tail).filter(|_| !word.is_empty()) {
                    suffix = Some(rank);
                    tokens.pop();
                    tokens.push(word);
                }
            }
        }

        let stripped: String = tokens
            .join(" ")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();
        let base = stripped
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Self { base, suffix }
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.suffix.is_none()
    }

    /// The full comparison key.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.base.is_empty(), self.suffix) {
            (_, None) => f.write_str(&self.base),
            (true, Some(suffix)) => f.write_str(suffix),
            (false, Some(suffix)) => write!(f, "{} {}", self.base, suffix),
        }
    }
}

fn rank_suffix(token: &str) -> Option<&'static str> {
    RANK_SUFFIXES
        .iter()
        .copied()
        .find(|rank| token.eq_ignore_ascii_case(rank))
}

/// Canonical comparison key for `name`.
pub fn normalize(name: &str) -> String {
    NormalizedName::parse(name).key()
}

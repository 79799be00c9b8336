use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Outcome of scraping one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRunSummary {
    pub name: String,
    /// Page indices attempted.
    pub pages: u32,
    /// Cards extracted and merged.
    pub cards: usize,
    /// Pages whose fetch failed and were skipped.
    pub failed_pages: u32,
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Sets in the registry when the run started.
    pub total_sets: usize,
    /// Sets scraped by this run.
    pub scraped_sets: usize,
    pub cards_added: usize,
    pub pages_failed: u32,
    pub sets: Vec<SetRunSummary>,
}

/// Snapshot of the orchestrator for status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatus {
    pub running: bool,
    pub last_report: Option<SyncReport>,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("A sync is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

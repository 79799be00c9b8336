//! Scrape orchestration: turns unscraped sets into catalog cards.

mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::{Card, CardSet, CatalogError, CatalogManager};
use crate::extractor::CardExtractor;
use crate::fetcher::PageFetcher;
use crate::metrics;

/// Cards collected for one set before merging.
struct SetRun {
    set_name: String,
    cards: Vec<Card>,
    pages: u32,
    failed_pages: u32,
}

/// Drives fetch and extraction over every unscraped set.
///
/// Only one run may be in flight; overlapping requests get
/// [`SyncError::AlreadyRunning`].
pub struct SyncOrchestrator {
    catalog: Arc<CatalogManager>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: CardExtractor,
    page_suffix: String,
    max_concurrent_sets: usize,
    running: Arc<Mutex<()>>,
    last_report: RwLock<Option<SyncReport>>,
}

impl SyncOrchestrator {
    pub fn new(
        catalog: Arc<CatalogManager>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: CardExtractor,
        page_suffix: impl Into<String>,
        max_concurrent_sets: usize,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            extractor,
            page_suffix: page_suffix.into(),
            max_concurrent_sets: max_concurrent_sets.max(1),
            running: Arc::new(Mutex::new(())),
            last_report: RwLock::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.try_lock().is_err()
    }

    pub async fn last_report(&self) -> Option<SyncReport> {
        self.last_report.read().await.clone()
    }

    pub async fn status(&self) -> SyncStatus {
        SyncStatus {
            running: self.is_running(),
            last_report: self.last_report().await,
        }
    }

    fn acquire(&self) -> Result<OwnedMutexGuard<()>, SyncError> {
        self.running.clone().try_lock_owned().map_err(|_| {
            metrics::SYNC_RUNS.with_label_values(&["rejected"]).inc();
            warn!("Sync requested while another run is in flight");
            SyncError::AlreadyRunning
        })
    }

    /// Scrape every unscraped set and merge the results.
    pub async fn sync_sets(&self) -> Result<SyncReport, SyncError> {
        let guard = self.acquire()?;
        self.run(guard).await
    }

    /// Start a run in the background.
    ///
    /// The single-flight slot is taken before returning, so a second call
    /// fails immediately rather than inside the spawned task.
    pub fn spawn_sync(
        self: &Arc<Self>,
    ) -> Result<JoinHandle<Result<SyncReport, SyncError>>, SyncError> {
        let guard = self.acquire()?;
        let this = Arc::clone(self);
        Ok(tokio::spawn(async move {
            let result = this.run(guard).await;
            if let Err(e) = &result {
                warn!(error = %e, "Background sync failed");
            }
            result
        }))
    }

    async fn run(&self, _guard: OwnedMutexGuard<()>) -> Result<SyncReport, SyncError> {
        let timer = Instant::now();
        let result = self.run_inner().await;

        let label = if result.is_ok() { "success" } else { "failed" };
        metrics::SYNC_RUNS.with_label_values(&[label]).inc();
        metrics::SYNC_DURATION
            .with_label_values(&[label])
            .observe(timer.elapsed().as_secs_f64());

        if let Ok(report) = &result {
            *self.last_report.write().await = Some(report.clone());
        }
        result
    }

    async fn run_inner(&self) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();
        let sets = self.catalog.list_sets();
        let total_sets = sets.len();
        let pending: Vec<CardSet> = sets.into_iter().filter(|s| !s.scraped).collect();

        info!(
            total_sets,
            pending = pending.len(),
            "Starting catalog sync"
        );

        let mut summaries = Vec::new();
        let mut runs = stream::iter(pending)
            .map(|set| self.scrape_set(set))
            .buffered(self.max_concurrent_sets);

        while let Some(run) = runs.next().await {
            let cards = run.cards.len();
            match self.catalog.merge_set_run(&run.set_name, run.cards).await {
                Ok(()) => {}
                Err(CatalogError::SetNotFound(name)) => {
                    warn!(set = %name, "Set disappeared during sync, dropping its cards");
                    continue;
                }
                Err(e) => {
                    warn!(set = %run.set_name, error = %e, "Failed to persist set run");
                    return Err(e.into());
                }
            }

            metrics::CARDS_SCRAPED.inc_by(cards as u64);
            info!(
                set = %run.set_name,
                cards,
                failed_pages = run.failed_pages,
                "Set scraped"
            );
            summaries.push(SetRunSummary {
                name: run.set_name,
                pages: run.pages,
                cards,
                failed_pages: run.failed_pages,
            });
        }

        let report = SyncReport {
            started_at,
            finished_at: Utc::now(),
            total_sets,
            scraped_sets: summaries.len(),
            cards_added: summaries.iter().map(|s| s.cards).sum(),
            pages_failed: summaries.iter().map(|s| s.failed_pages).sum(),
            sets: summaries,
        };

        info!(
            scraped = report.scraped_sets,
            total = report.total_sets,
            cards_added = report.cards_added,
            "Catalog sync finished"
        );
        Ok(report)
    }

    /// Fetch and extract every page of `set`, in index order.
    async fn scrape_set(&self, set: CardSet) -> SetRun {
        info!(set = %set.name, length = set.length, "Scraping set");

        let mut cards = Vec::new();
        let mut failed_pages = 0;

        for index in 1..=set.length {
            let url = set.page_url(index, &self.page_suffix);
            let body = match self.fetcher.fetch(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(set = %set.name, index, url = %url, error = %e, "Skipping page");
                    metrics::PAGES_FETCHED.with_label_values(&["failed"]).inc();
                    failed_pages += 1;
                    continue;
                }
            };

            match self.extractor.extract(&body) {
                Some(card) => {
                    debug!(set = %set.name, index, card = %card.name, "Extracted card");
                    metrics::PAGES_FETCHED.with_label_values(&["card"]).inc();
                    cards.push(card);
                }
                None => {
                    debug!(set = %set.name, index, "No card on page");
                    metrics::PAGES_FETCHED.with_label_values(&["empty"]).inc();
                }
            }
        }

        SetRun {
            set_name: set.name,
            cards,
            pages: set.length,
            failed_pages,
        }
    }
}

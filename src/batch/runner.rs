//! Sequential batch loop driving fetch → extract per id.
//!
//! Ids are processed strictly one at a time; the politeness delay between
//! requests is the mechanism that enforces the rate contract against the
//! remote origin, so this loop must not be parallelized.

use crate::error::{Result, ScrapeError};
use crate::fatura::{extractor, PageSource};
use crate::model::{BatchResult, PageRecord, ProgressEvent, ProgressSnapshot};
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

const MIN_DELAY_MS: u64 = 10;
const MAX_DELAY_MS: u64 = 30;
const LONG_PAUSE_EVERY: usize = 1000;
const LONG_PAUSE_MIN_MS: u64 = 500;
const LONG_PAUSE_MAX_MS: u64 = 1000;

const PROGRESS_CHANNEL_CAPACITY: usize = 32;

/// One batch invocation: the origin prefix and the id range to walk.
///
/// The page URL for each id is `base_url` with the decimal id appended.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub base_url: String,
    pub start_id: u64,
    pub count: usize,
}

/// Drives the per-id loop over a [`PageSource`], absorbing per-id failures.
pub struct BatchRunner<S> {
    source: Arc<S>,
}

impl<S> Clone for BatchRunner<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: PageSource> BatchRunner<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Runs a batch to completion and returns the aggregate result.
    ///
    /// Never fails as a whole: per-id errors increment `failed_count` and
    /// the loop continues, so the result is returned even if every id fails.
    pub async fn run(&self, job: &BatchJob) -> BatchResult {
        self.run_observed(job, |_| std::future::ready(())).await
    }

    /// Runs a batch, reporting a [`ProgressSnapshot`] to `observe` after each
    /// id (success or failure).
    pub async fn run_observed<F, Fut>(&self, job: &BatchJob, mut observe: F) -> BatchResult
    where
        F: FnMut(ProgressSnapshot) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut result = BatchResult::default();

        for i in 0..job.count {
            let current_id = job.start_id + i as u64;
            let url = format!("{}{}", job.base_url, current_id);

            match self.scrape_one(&url).await {
                Ok(mut record) => {
                    record.insert("ID", current_id.to_string());
                    result.records.push(record);
                    result.success_count += 1;
                }
                Err(err) => {
                    result.failed_count += 1;
                    tracing::warn!("ID {} failed: {}", current_id, err);
                }
            }

            observe(ProgressSnapshot::new(
                i + 1,
                job.count,
                result.success_count,
                result.failed_count,
                current_id,
            ))
            .await;

            polite_sleep(i).await;
        }

        result
    }

    async fn scrape_one(&self, url: &str) -> Result<PageRecord, ScrapeError> {
        let html = self.source.fetch(url).await?;
        Ok(extractor::extract(&html)?)
    }
}

impl<S: PageSource + 'static> BatchRunner<S> {
    /// Runs a batch in the background, delivering one
    /// [`ProgressEvent::Progress`] per processed id followed by a terminal
    /// [`ProgressEvent::Complete`] carrying the full result.
    ///
    /// The spawned loop runs to completion even if the receiver is dropped;
    /// undeliverable events are discarded.
    pub fn stream(self, job: BatchJob) -> mpsc::Receiver<ProgressEvent> {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let progress_tx = tx.clone();

        tokio::spawn(async move {
            let result = self
                .run_observed(&job, |snapshot| {
                    let tx = progress_tx.clone();
                    async move {
                        let _ = tx.send(ProgressEvent::Progress(snapshot)).await;
                    }
                })
                .await;
            let _ = tx.send(ProgressEvent::complete(result)).await;
        });

        rx
    }
}

/// Politeness delay applied after every id: a short uniform jitter, plus a
/// longer pause every `LONG_PAUSE_EVERY`th non-zero index to break up
/// sustained bursts.
async fn polite_sleep(index: usize) {
    let delay_ms = rand::rng().random_range(MIN_DELAY_MS..=MAX_DELAY_MS);
    sleep(Duration::from_millis(delay_ms)).await;

    if index > 0 && index % LONG_PAUSE_EVERY == 0 {
        let pause_ms = rand::rng().random_range(LONG_PAUSE_MIN_MS..=LONG_PAUSE_MAX_MS);
        sleep(Duration::from_millis(pause_ms)).await;
    }
}

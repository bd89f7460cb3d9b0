//! Fatura Scraper
//!
//! This application walks a range of numeric invoice ids on a remote origin,
//! extracts the structured fields from each invoice page, and exports the
//! accumulated records as a single XLSX workbook.
//!
//! # Architecture
//!
//! - **Fetcher** (`fatura::Client`): rate-aware page retrieval with bounded
//!   retries and rotating identity headers
//! - **Extractor** (`fatura::extractor`): structural parsing of one page
//!   into a flat record with dynamically-named meter fields
//! - **Batch runner** (`batch::BatchRunner`): sequential per-id loop with
//!   politeness delays and per-id progress reporting
//! - **Exporter** (`export`): union-of-columns XLSX serialization
//!
//! Per-id failures never abort a batch; they only show up in the failure
//! counter. Export failures are surfaced to the caller.

mod batch;
mod config;
mod error;
mod export;
mod fatura;
mod model;

#[cfg(test)]
mod test_utils;

use crate::batch::{BatchJob, BatchRunner};
use crate::fatura::Client;
use crate::model::ProgressEvent;
use anyhow::Context;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_app_config().context("Failed to load AppConfig")?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let fetcher_config = config::load_fetcher_config().context("Failed to load FetcherConfig")?;
    let job_config = config::load_job_config().context("Failed to load JobConfig")?;

    let client = Arc::new(Client::new(fetcher_config));
    let runner = BatchRunner::new(client);
    let job = BatchJob {
        base_url: job_config.base_url.clone(),
        start_id: job_config.start_id,
        count: job_config.count,
    };

    tracing::info!(
        "Scraping {} pages from {} starting at id {}",
        job.count,
        job.base_url,
        job.start_id
    );

    let mut events = runner.stream(job);
    let mut results = None;
    while let Some(event) = events.recv().await {
        match event {
            ProgressEvent::Progress(snapshot) => {
                tracing::info!(
                    "[{}/{}] id={} ok={} failed={} ({}%)",
                    snapshot.current,
                    snapshot.total,
                    snapshot.current_id,
                    snapshot.success_count,
                    snapshot.failed_count,
                    snapshot.percentage
                );
            }
            ProgressEvent::Complete {
                success_count,
                failed_count,
                results: records,
                ..
            } => {
                tracing::info!(
                    "Finished: {} succeeded, {} failed",
                    success_count,
                    failed_count
                );
                results = Some(records);
            }
        }
    }
    let records = results.context("Progress stream ended without a completion event")?;

    let workbook = export::export(&records).context("Failed to export workbook")?;
    let output = job_config
        .output
        .unwrap_or_else(|| export::export_filename(records.len()));
    std::fs::write(&output, &workbook)
        .with_context(|| format!("Failed to write {}", output))?;

    tracing::info!("Wrote {} records to {}", records.len(), output);
    Ok(())
}

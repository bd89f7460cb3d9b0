use serde_derive::Serialize;

use super::record::{BatchResult, PageRecord};

/// Immutable snapshot reported after each processed id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// 1-based index of the id just processed
    pub current: usize,
    /// Total number of ids in the batch
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// The id just processed
    pub current_id: u64,
    /// `current / total * 100`, rounded to one decimal place
    pub percentage: f64,
}

impl ProgressSnapshot {
    pub fn new(
        current: usize,
        total: usize,
        success_count: usize,
        failed_count: usize,
        current_id: u64,
    ) -> Self {
        Self {
            current,
            total,
            success_count,
            failed_count,
            current_id,
            percentage: percentage(current, total),
        }
    }
}

fn percentage(current: usize, total: usize) -> f64 {
    (current as f64 / total as f64 * 1000.0).round() / 10.0
}

/// One element of the incremental delivery mode: a per-id progress snapshot,
/// or the terminal event carrying the full accumulated result.
///
/// Serializes with a `status` tag so a transport layer can frame the events
/// (e.g. as server-sent events) without knowing their internals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProgressEvent {
    Progress(ProgressSnapshot),
    Complete {
        total: usize,
        success_count: usize,
        failed_count: usize,
        results: Vec<PageRecord>,
    },
}

impl ProgressEvent {
    /// Builds the terminal event from a finished batch.
    pub fn complete(result: BatchResult) -> Self {
        Self::Complete {
            total: result.success_count + result.failed_count,
            success_count: result.success_count,
            failed_count: result.failed_count,
            results: result.records,
        }
    }
}

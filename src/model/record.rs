use indexmap::IndexMap;
use serde_derive::Serialize;

/// A flat, insertion-ordered mapping of field name to string value for one
/// invoice page.
///
/// Field names are not fixed ahead of time: a base set of user/site fields is
/// always present (empty string when absent from the page), and an open-ended
/// set of meter fields is appended as they are discovered in the page's meter
/// table. Insertion order is preserved so the exporter can lay out columns in
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageRecord(IndexMap<String, String>);

impl PageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, keeping the original position if the field already
    /// exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The outcome of one batch run: successfully extracted records in id order,
/// plus success/failure counters.
///
/// Created fresh per invocation and owned by the runner for the batch's
/// lifetime; `success_count + failed_count` always equals the number of ids
/// processed, and `records.len()` equals `success_count`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub records: Vec<PageRecord>,
    pub success_count: usize,
    pub failed_count: usize,
}

//! Error types for the fatura scraper.
//!
//! This module defines typed errors for different components of the application,
//! providing better error categorization and enabling specific error handling strategies.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Per-page scraping errors (retrieval or page structure)
    #[error("scrape error")]
    Scrape(#[from] ScrapeError),

    /// Spreadsheet export errors
    #[error("export error")]
    Export(#[from] ExportError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to load {section}: {message}")]
    EnvParse { section: String, message: String },
}

/// Page retrieval errors.
///
/// Raised once all fetch attempts for a single page are exhausted. Non-fatal
/// to a batch: the runner counts the failure and moves on to the next id.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Transport-level failure (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// No fetch attempt ever completed (e.g. max_retries configured to 0)
    #[error("no fetch attempt completed")]
    NoAttempt,
}

/// Page structure errors.
///
/// Raised when a successfully fetched page does not look like an invoice
/// page. Non-fatal to a batch, same handling as [`RetrievalError`].
#[derive(Error, Debug)]
pub enum StructureError {
    /// A mandatory section is absent from the page
    #[error("required section not found: {selector}")]
    SectionMissing { selector: String },

    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Union of the two per-page failure modes, caught at the id boundary.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Spreadsheet export errors.
///
/// Unlike per-page errors these are never swallowed: an export failure
/// propagates to the caller as a user-visible error.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Export requested with zero records
    #[error("no records to export")]
    EmptyInput,

    /// Workbook serialization failed
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(section: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::EnvParse {
            section: section.into(),
            message: err.to_string(),
        }
    }
}

impl RetrievalError {
    /// Creates a status error from an HTTP status code.
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
        }
    }
}

impl StructureError {
    /// Creates a section missing error.
    pub fn section_missing(selector: impl Into<String>) -> Self {
        Self::SectionMissing {
            selector: selector.into(),
        }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }
}

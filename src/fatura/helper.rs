//! Helper functions for parsing invoice page HTML.

use crate::error::{Result, StructureError};
use scraper::{ElementRef, Selector};

/// Creates a CSS selector from a string.
///
/// This is a wrapper around scraper's Selector::parse that converts parsing
/// errors into our typed [`StructureError`] for consistent error handling.
pub fn html_selector(selector: &str) -> Result<Selector, StructureError> {
    Selector::parse(selector).map_err(|e| StructureError::invalid_selector(selector, e))
}

/// Concatenates an element's text content and trims surrounding whitespace.
///
/// Invoice page values carry no markup of their own, so the concatenated
/// descendant text is the value verbatim.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

//! Mock implementations for testing.

use crate::error::{Result, RetrievalError};
use crate::fatura::PageSource;
use async_trait::async_trait;
use std::collections::HashMap;

enum ScriptedPage {
    Html(String),
    FetchFailure,
}

/// Scripted [`PageSource`] keyed by URL, for driving the batch runner
/// without a live server.
///
/// Unscripted URLs fail the same way as scripted failures, so a test only
/// has to enumerate the pages it cares about.
#[derive(Default)]
pub struct MockPageSource {
    pages: HashMap<String, ScriptedPage>,
}

impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful fetch returning the given HTML body.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages
            .insert(url.into(), ScriptedPage::Html(html.into()));
        self
    }

    /// Scripts a retrieval failure for the given URL.
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.pages.insert(url.into(), ScriptedPage::FetchFailure);
        self
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        match self.pages.get(url) {
            Some(ScriptedPage::Html(html)) => Ok(html.clone()),
            Some(ScriptedPage::FetchFailure) | None => {
                Err(RetrievalError::Status { status: 500 })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_page_is_returned() {
        let source = MockPageSource::new().with_page("http://test.local/1", "<html></html>");
        let body = source.fetch("http://test.local/1").await.unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_unscripted_url_fails() {
        let source = MockPageSource::new();
        let result = source.fetch("http://test.local/unknown").await;
        assert!(matches!(
            result.unwrap_err(),
            RetrievalError::Status { status: 500 }
        ));
    }
}

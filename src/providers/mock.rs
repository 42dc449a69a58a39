/*!
 * In-memory page source.
 *
 * Serves canned bodies keyed by URL and records every URL it was asked for, so
 * tests can assert which documents the scraper retrieved.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::errors::FetchError;
use crate::providers::PageSource;

/// Page source answering from a fixed URL-to-body map
#[derive(Debug, Default)]
pub struct StaticPageSource {
    /// Canned response bodies
    pages: HashMap<String, String>,
    /// URLs requested so far, in order
    requested: Mutex<Vec<String>>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body for a URL
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in order
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().await.push(url.to_string());

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status_code: 404,
                url: url.to_string(),
            })
    }
}

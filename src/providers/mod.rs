/*!
 * Page sources for retrieving watch pages and transcript documents.
 *
 * The scraper only needs "URL in, text out". This module defines that seam and
 * ships two implementations:
 * - `HttpPageSource`: reqwest-backed retrieval over the network
 * - `StaticPageSource`: in-memory responses for tests and offline use
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::FetchError;

/// Common trait for all page sources
///
/// Implementations own transport concerns such as timeouts and retries; the
/// scraper calls `fetch_text` once per document and propagates any error.
#[async_trait]
pub trait PageSource: Send + Sync + Debug {
    /// Retrieve the body of `url` as text
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the document
    ///
    /// # Returns
    /// * `Result<String, FetchError>` - The response body or a transport error
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

pub mod http;
pub mod mock;

pub use http::HttpPageSource;
pub use mock::StaticPageSource;

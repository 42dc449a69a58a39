/*!
 * Error types for the caption-scraper library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Two families exist side by side:
 * - `CaptionLookupError` describes "no captions" outcomes. These are recoverable and
 *   the scraper turns them into empty results.
 * - `ScraperError` and `FetchError` describe failures that abort a request.
 */

use thiserror::Error;

/// Reasons a caption track could not be located for a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionLookupError {
    /// The page does not mention caption tracks at all
    #[error("page markup does not contain caption data")]
    MarkerMissing,

    /// The caption marker is present but no manifest array follows the key
    #[error("caption manifest key present but no array could be located")]
    ManifestUnmatched,

    /// The manifest array was located but could not be decoded
    #[error("caption manifest could not be decoded: {0}")]
    ManifestInvalid(String),

    /// No advertised track matches the requested language
    #[error("no caption track matches language '{lang}'")]
    NoMatchingTrack {
        /// Requested language code
        lang: String,
    },

    /// The selected track has no usable download URL
    #[error("caption track '{vss_id}' has no usable base URL")]
    MissingBaseUrl {
        /// vssId of the selected track
        vss_id: String,
    },
}

/// Errors raised by a page source while retrieving a document
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read
    #[error("request to {url} failed: {message}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying transport message
        message: String,
    },

    /// The server answered with a non-success status
    #[error("{url} responded with status {status_code}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Requested URL
        url: String,
    },
}

/// Errors that abort a subtitle request
#[derive(Error, Debug)]
pub enum ScraperError {
    /// The request or its proxy callback is misconfigured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Retrieving the page or the transcript failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        match error.status() {
            Some(status) => Self::Status {
                status_code: status.as_u16(),
                url,
            },
            None => Self::Request {
                url,
                message: error.to_string(),
            },
        }
    }
}

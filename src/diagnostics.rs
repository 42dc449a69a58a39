/*!
 * Recoverable conditions reported while scraping.
 *
 * Nothing in here aborts a request. Every condition is logged at `warn` and then
 * handed to a `DiagnosticSink`, so callers can surface warnings themselves.
 */

use std::fmt;
use std::sync::Mutex;

use log::warn;

use crate::errors::CaptionLookupError;

/// A non-fatal condition observed while extracting captions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Page markup has no caption data
    CaptionMarkerMissing,
    /// Caption data is mentioned but no manifest array follows it
    ManifestUnmatched,
    /// Manifest array could not be decoded
    ManifestInvalid { reason: String },
    /// No track matched the requested language
    NoMatchingTrack { lang: String },
    /// The selected track cannot be downloaded
    TrackMissingUrl { vss_id: String },
    /// A transcript segment lacked a timing attribute and was skipped
    MalformedSegment {
        /// Zero-based position of the segment in the document
        index: usize,
        /// Name of the missing attribute
        missing: &'static str,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaptionMarkerMissing => write!(f, "no captions found in page markup"),
            Self::ManifestUnmatched => write!(f, "caption manifest could not be located"),
            Self::ManifestInvalid { reason } => {
                write!(f, "caption manifest could not be decoded: {}", reason)
            }
            Self::NoMatchingTrack { lang } => {
                write!(f, "could not find captions for language '{}'", lang)
            }
            Self::TrackMissingUrl { vss_id } => {
                write!(f, "caption track '{}' has no download URL", vss_id)
            }
            Self::MalformedSegment { index, missing } => {
                write!(f, "skipping transcript segment {}: missing '{}' attribute", index, missing)
            }
        }
    }
}

impl From<CaptionLookupError> for Diagnostic {
    fn from(error: CaptionLookupError) -> Self {
        match error {
            CaptionLookupError::MarkerMissing => Self::CaptionMarkerMissing,
            CaptionLookupError::ManifestUnmatched => Self::ManifestUnmatched,
            CaptionLookupError::ManifestInvalid(reason) => Self::ManifestInvalid { reason },
            CaptionLookupError::NoMatchingTrack { lang } => Self::NoMatchingTrack { lang },
            CaptionLookupError::MissingBaseUrl { vss_id } => Self::TrackMissingUrl { vss_id },
        }
    }
}

/// Receiver for recoverable conditions
pub trait DiagnosticSink: Send + Sync {
    /// Called once per condition, in the order they occur
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Sink that discards conditions; they still reach the log facade
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Sink that keeps every reported condition for later inspection
#[derive(Debug, Default)]
pub struct CollectingSink {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.collected.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match self.collected.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}

/// Log a condition and forward it to the sink
pub(crate) fn emit(sink: &dyn DiagnosticSink, diagnostic: Diagnostic) {
    warn!("{}", diagnostic);
    sink.report(&diagnostic);
}

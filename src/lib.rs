/*!
 * # caption-scraper
 *
 * A Rust library for retrieving video captions as timed subtitle entries.
 *
 * ## Features
 *
 * - Locate the caption-track manifest embedded in a watch page
 * - Select a track by language with a fixed fallback order:
 *   manual (`.en`), then automatic (`a.en`), then regional (`.en-US`)
 * - Parse timed-text transcripts into plain, entity-decoded text
 * - Extract the page title and description
 * - Pluggable page sources and proxy URL rewriting
 * - Recoverable conditions reported through an injectable diagnostics sink
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption_manifest`: Manifest extraction and track selection
 * - `transcript_parser`: Timed-text document parsing
 * - `video_page`: Watch-page URLs, video ids and meta tags
 * - `subtitle_scraper`: Request orchestration (`SubtitleScraper`)
 * - `providers`: Page sources (`HttpPageSource`, `StaticPageSource`)
 * - `diagnostics`: Recoverable conditions and sinks
 * - `app_config`: Configuration management
 * - `language_utils`: vssId and ISO language code utilities
 * - `errors`: Custom error types for the library
 *
 * ## Example
 *
 * ```no_run
 * use caption_scraper::{Config, SubtitleRequest, SubtitleScraper};
 *
 * # async fn run() -> Result<(), caption_scraper::ScraperError> {
 * let scraper = SubtitleScraper::from_config(Config::default())?;
 * let entries = scraper
 *     .fetch_subtitles(&SubtitleRequest::new("dQw4w9WgXcQ").lang("en"))
 *     .await?;
 * for entry in entries {
 *     println!("{}", entry);
 * }
 * # Ok(())
 * # }
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod caption_manifest;
pub mod diagnostics;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod subtitle_scraper;
pub mod transcript_parser;
pub mod video_page;

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel};
pub use caption_manifest::{CaptionTrackRef, extract_caption_tracks, select_track};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NoopSink};
pub use errors::{CaptionLookupError, FetchError, ScraperError};
pub use providers::{HttpPageSource, PageSource, StaticPageSource};
pub use subtitle_scraper::{FnProxy, ProxyRewrite, SubtitleRequest, SubtitleScraper, VideoDetails};
pub use transcript_parser::{SubtitleEntry, parse_transcript, parse_transcript_with};

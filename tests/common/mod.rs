/*!
 * Common test utilities for the caption-scraper test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Watch URL the default configuration builds for `VIDEO_ID`
pub const WATCH_URL: &str = "https://m.youtube.com/watch?v=abc123XYZ_-";

/// Video id used throughout the tests
pub const VIDEO_ID: &str = "abc123XYZ_-";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a watch page embedding the given caption manifest
pub fn watch_page(title: Option<&str>, description: Option<&str>, manifest: &str) -> String {
    let mut head = String::new();
    if let Some(title) = title {
        head.push_str(&format!(r#"<meta name="title" content="{}">"#, title));
    }
    if let Some(description) = description {
        head.push_str(&format!(r#"<meta name="description" content="{}">"#, description));
    }
    format!(
        r#"<html><head>{}</head><body><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":{},"translationLanguages":[]}}}}}};</script></body></html>"#,
        head, manifest
    )
}

/// Manifest JSON for (base_url, vss_id) pairs
pub fn manifest(tracks: &[(&str, &str)]) -> String {
    let items: Vec<String> = tracks
        .iter()
        .map(|(url, vss)| format!(r#"{{"baseUrl":"{}","vssId":"{}","isTranslatable":true}}"#, url, vss))
        .collect();
    format!("[{}]", items.join(","))
}

/// A small transcript with one malformed segment in the middle
pub fn sample_transcript() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="1.5">First line</text><text start="2.0">no duration</text><text start="3.25" dur="2">Tom &amp;amp; Jerry</text>
<text start="5.25" dur="1.75">it&amp;#39;s &lt;i&gt;fine&lt;/i&gt;</text></transcript>"#
}

/// Routes library log output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

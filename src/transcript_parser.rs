use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{self, Diagnostic, DiagnosticSink, NoopSink};

// @module: Timed-text transcript parsing

// @const: Wrapper strings removed before splitting
const WRAPPERS: [&str; 4] = [
    r#"<?xml version="1.0" encoding="utf-8" ?>"#,
    r#"<?xml version='1.0' encoding='UTF-8'?>"#,
    "<transcript>",
    "</transcript>",
];

// @const: Closing tag of one text segment
const SEGMENT_END: &str = "</text>";

static START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"start="(\d+(?:\.\d+)?)""#).unwrap()
});

static DUR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"dur="(\d+(?:\.\d+)?)""#).unwrap()
});

// @const: Everything up to and including the opening <text ...> tag
static OPEN_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^.*?<text[^>]*>").unwrap()
});

static AMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)&amp;").unwrap()
});

// @const: Any tag, including one left unterminated at the end of the text
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[^>]+(>|$)").unwrap()
});

// @struct: Single timed caption line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    // @field: Start offset in decimal seconds, as written in the document
    pub start: String,

    // @field: Duration in decimal seconds, as written in the document
    pub dur: String,

    // @field: Plain decoded text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(start: impl Into<String>, dur: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            start: start.into(),
            dur: dur.into(),
            text: text.into(),
        }
    }

    pub fn start_seconds(&self) -> Option<f64> {
        self.start.parse().ok()
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.dur.parse().ok()
    }

    pub fn end_seconds(&self) -> Option<f64> {
        Some(self.start_seconds()? + self.duration_seconds()?)
    }

    /// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Render this entry as one numbered SRT block
    pub fn format_srt_block(&self, seq_num: usize) -> String {
        let to_ms = |secs: f64| (secs * 1000.0).round() as u64;
        let start_ms = self.start_seconds().map(to_ms).unwrap_or(0);
        let end_ms = self.end_seconds().map(to_ms).unwrap_or(start_ms);

        format!(
            "{}\n{} --> {}\n{}\n\n",
            seq_num,
            Self::format_timestamp(start_ms),
            Self::format_timestamp(end_ms),
            self.text
        )
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} +{}] {}", self.start, self.dur, self.text)
    }
}

/// Render entries as an SRT document, numbered from 1
pub fn to_srt(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.format_srt_block(i + 1))
        .collect()
}

/// Parse a timed-text document; skipped segments are only logged
pub fn parse_transcript(document: &str) -> Vec<SubtitleEntry> {
    parse_transcript_with(document, &NoopSink)
}

/// Parse a timed-text document, reporting skipped segments to `sink`
///
/// Segments missing `start` or `dur` are dropped individually; the rest of the
/// document is still returned in order.
pub fn parse_transcript_with(document: &str, sink: &dyn DiagnosticSink) -> Vec<SubtitleEntry> {
    let body = WRAPPERS
        .iter()
        .fold(document.to_string(), |acc, wrapper| acc.replace(wrapper, ""));

    let mut entries = Vec::new();

    for (index, candidate) in body
        .split(SEGMENT_END)
        .filter(|c| !c.trim().is_empty())
        .enumerate()
    {
        let start = START_REGEX.captures(candidate).map(|caps| caps[1].to_string());
        let dur = DUR_REGEX.captures(candidate).map(|caps| caps[1].to_string());

        let (start, dur) = match (start, dur) {
            (Some(start), Some(dur)) => (start, dur),
            (None, _) => {
                diagnostics::emit(sink, Diagnostic::MalformedSegment { index, missing: "start" });
                continue;
            }
            (_, None) => {
                diagnostics::emit(sink, Diagnostic::MalformedSegment { index, missing: "dur" });
                continue;
            }
        };

        entries.push(SubtitleEntry {
            start,
            dur,
            text: clean_text(candidate),
        });
    }

    debug!("Parsed {} transcript entries", entries.len());
    entries
}

// Escaped markup becomes real markup after decoding, so tags are stripped twice
fn clean_text(candidate: &str) -> String {
    let body = OPEN_TAG_REGEX.replace(candidate, "");
    let unescaped = AMP_REGEX.replace_all(&body, "&");
    let stripped = TAG_REGEX.replace_all(&unescaped, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    TAG_REGEX.replace_all(&decoded, "").into_owned()
}

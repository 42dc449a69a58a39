/*!
 * Tests for timed-text transcript parsing
 */

use caption_scraper::diagnostics::{CollectingSink, Diagnostic};
use caption_scraper::transcript_parser::{parse_transcript, parse_transcript_with, to_srt, SubtitleEntry};
use crate::common;

/// Scenario: the segment without dur is skipped, the valid one decoded
#[test]
fn test_parse_withMissingDur_shouldReturnSingleEntry() {
    let doc = r#"<text start="1.0" dur="2.5">Hello &amp;amp; world</text><text start="3.0">broken</text>"#;
    let entries = parse_transcript(doc);

    assert_eq!(entries, vec![SubtitleEntry::new("1.0", "2.5", "Hello & world")]);
}

/// Escaped markup is removed rather than rendered
#[test]
fn test_parse_withDoubleEscapedMarkup_shouldYieldPlainText() {
    let doc = r#"<text start="0" dur="1">&amp;lt;b&amp;gt;Hi&amp;amp;Bye&amp;lt;/b&amp;gt;</text>"#;
    let entries = parse_transcript(doc);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Hi&Bye");
}

/// N good and M malformed segments yield N entries in document order
#[test]
fn test_parse_withMixedSegments_shouldKeepOnlyValidInOrder() {
    let mut doc = String::new();
    for i in 0..5 {
        doc.push_str(&format!(r#"<text start="{}.5" dur="1">line {}</text>"#, i, i));
        if i % 2 == 0 {
            doc.push_str(r#"<text dur="1">no start</text>"#);
        }
    }
    doc.push_str(r#"<text start="9">no dur</text>"#);

    let sink = CollectingSink::new();
    let entries = parse_transcript_with(&doc, &sink);

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["line 0", "line 1", "line 2", "line 3", "line 4"]);
    assert_eq!(sink.diagnostics().len(), 4);
    assert!(sink.diagnostics().iter().all(|d| matches!(d, Diagnostic::MalformedSegment { .. })));
}

/// Parsing the same document twice gives the same result
#[test]
fn test_parse_withSameDocument_shouldBeIdempotent() {
    let doc = common::sample_transcript();
    assert_eq!(parse_transcript(doc), parse_transcript(doc));
}

/// Full document with prolog, wrapper and entities
#[test]
fn test_parse_withWrappedDocument_shouldDecodeAllEntries() {
    let entries = parse_transcript(common::sample_transcript());

    assert_eq!(
        entries,
        vec![
            SubtitleEntry::new("0.5", "1.5", "First line"),
            SubtitleEntry::new("3.25", "2", "Tom & Jerry"),
            SubtitleEntry::new("5.25", "1.75", "it's fine"),
        ]
    );
}

/// Documents with nothing recoverable give an empty list
#[test]
fn test_parse_withEmptyOrGarbage_shouldReturnEmpty() {
    assert!(parse_transcript("").is_empty());
    assert!(parse_transcript("   \n  ").is_empty());
    assert!(parse_transcript("<transcript></transcript>").is_empty());
    assert!(parse_transcript("not xml at all").is_empty());
}

/// Timing attributes are kept verbatim and only interpreted on request
#[test]
fn test_entryTiming_withDecimalStrings_shouldInterpretOnDemand() {
    let entries = parse_transcript(r#"<text start="12.340" dur="0.660" extra="x">ok</text>"#);
    let entry = &entries[0];

    assert_eq!(entry.start, "12.340");
    assert_eq!(entry.dur, "0.660");
    assert_eq!(entry.start_seconds(), Some(12.34));
    assert!((entry.end_seconds().unwrap() - 13.0).abs() < 1e-9);
}

/// SRT rendering numbers entries from one
#[test]
fn test_toSrt_withTwoEntries_shouldNumberBlocks() {
    let entries = vec![
        SubtitleEntry::new("0", "1.5", "one"),
        SubtitleEntry::new("3600", "2", "two"),
    ];
    let srt = to_srt(&entries);

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,500\none\n\n2\n01:00:00,000 --> 01:00:02,000\ntwo\n\n"
    );
}

/*!
 * Tests for caption manifest extraction and track selection
 */

use caption_scraper::caption_manifest::{available_languages, extract_caption_tracks, select_track, CaptionTrackRef};
use caption_scraper::errors::CaptionLookupError;
use crate::common;

/// Markup without the marker never yields tracks
#[test]
fn test_extract_withoutMarker_shouldReturnMarkerMissing() {
    let markup = r#"<html><meta name="title" content="No captions"></html>"#;
    assert_eq!(extract_caption_tracks(markup), Err(CaptionLookupError::MarkerMissing));
}

/// Marker present but array corrupted is NotFound, not a panic
#[test]
fn test_extract_withCorruptedArray_shouldReturnNotFound() {
    let corrupted = [
        r#"{"captionTracks":[{"baseUrl":"https://t/1","vssId":".en"},{"baseUrl""#,
        r#"{"captionTracks":[1,2,3]}"#,
        r#"{"captionTracks":"none"}"#,
        r#"captionTracks appears only in prose"#,
    ];

    for markup in corrupted {
        let result = extract_caption_tracks(markup);
        assert!(
            matches!(
                result,
                Err(CaptionLookupError::ManifestInvalid(_)) | Err(CaptionLookupError::ManifestUnmatched)
            ),
            "unexpected result for {}: {:?}",
            markup,
            result
        );
    }
}

/// Tracks keep manifest order and escaped URLs are decoded
#[test]
fn test_extract_withEscapedUrl_shouldDecodeJsonEscapes() {
    let markup = common::watch_page(
        None,
        None,
        r#"[{"baseUrl":"https://t/api?v=1\u0026lang=en","vssId":".en"},{"baseUrl":"https://t/2","vssId":"a.en"}]"#,
    );
    let tracks = extract_caption_tracks(&markup).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].base_url.as_deref(), Some("https://t/api?v=1&lang=en"));
    assert_eq!(available_languages(&tracks), vec![".en", "a.en"]);
}

/// Scenario: automatic track wins when the manual one is absent
#[test]
fn test_select_withAutoEnglishAndFrench_shouldPickAutoEnglish() {
    let markup = common::watch_page(
        None,
        None,
        &common::manifest(&[("https://t/auto-en", "a.en"), ("https://t/fr", ".fr")]),
    );
    let tracks = extract_caption_tracks(&markup).unwrap();
    let selected = select_track(&tracks, "en").unwrap();

    assert_eq!(selected.vss_id.as_deref(), Some("a.en"));
    assert_eq!(selected.base_url.as_deref(), Some("https://t/auto-en"));
}

/// Selection is deterministic and tier ordered for every language tried
#[test]
fn test_select_withRepeatedCalls_shouldBeDeterministic() {
    let tracks = vec![
        CaptionTrackRef::new("u-de-at", ".de-AT"),
        CaptionTrackRef::new("u-en-us", ".en-US"),
        CaptionTrackRef::new("u-a-de", "a.de"),
        CaptionTrackRef::new("u-en", ".en"),
        CaptionTrackRef::new("u-en-2", ".en"),
    ];

    let expectations = [("en", "u-en"), ("de", "u-a-de"), ("de-AT", "u-de-at")];
    for (lang, expected) in expectations {
        for _ in 0..3 {
            let selected = select_track(&tracks, lang).unwrap();
            assert_eq!(selected.base_url.as_deref(), Some(expected), "lang {}", lang);
        }
    }

    assert!(matches!(
        select_track(&tracks, "ja"),
        Err(CaptionLookupError::NoMatchingTrack { .. })
    ));
}

/// A record without baseUrl is rejected at selection time
#[test]
fn test_select_withMissingBaseUrl_shouldReturnMissingBaseUrl() {
    let markup = common::watch_page(None, None, r#"[{"vssId":".en"}]"#);
    let tracks = extract_caption_tracks(&markup).unwrap();

    assert_eq!(
        select_track(&tracks, "en"),
        Err(CaptionLookupError::MissingBaseUrl { vss_id: ".en".to_string() })
    );
}

/// Empty manifest means no track for any language
#[test]
fn test_select_withEmptyManifest_shouldReturnNoMatchingTrack() {
    let tracks = extract_caption_tracks(&common::watch_page(None, None, "[]")).unwrap();
    assert!(tracks.is_empty());
    assert_eq!(
        select_track(&tracks, "en"),
        Err(CaptionLookupError::NoMatchingTrack { lang: "en".to_string() })
    );
}

/// Track helpers expose the language behind a vssId
#[test]
fn test_trackHelpers_withVariousVssIds_shouldDescribeLanguage() {
    let manual = CaptionTrackRef::new("u", ".fr");
    let auto = CaptionTrackRef::new("u", "a.de");

    assert!(!manual.is_auto_generated());
    assert!(auto.is_auto_generated());
    assert_eq!(manual.language_name().as_deref(), Some("French"));
    assert_eq!(auto.language_tag(), Some("de"));
}

/// Oddly-typed optional fields do not cost the whole manifest
#[test]
fn test_extract_withOddlyTypedFields_shouldKeepUsableTrack() {
    let markup = r#"{"captionTracks":[{"baseUrl":"https://t/en","vssId":".en","name":"English","kind":7,"languageCode":null},{"baseUrl":42,"vssId":".fr","name":{"simpleText":["Français"]}}]}"#;

    let tracks = extract_caption_tracks(markup).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, None);
    assert_eq!(tracks[0].kind, None);
    assert_eq!(tracks[0].language_code, None);
    assert_eq!(tracks[1].base_url, None);
    assert_eq!(tracks[1].name.as_ref().and_then(|n| n.simple_text.clone()), None);

    assert_eq!(select_track(&tracks, "en").unwrap().usable_url(), Some("https://t/en"));
    assert_eq!(
        select_track(&tracks, "fr"),
        Err(CaptionLookupError::MissingBaseUrl { vss_id: ".fr".to_string() })
    );
}

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CaptionLookupError;
use crate::language_utils;

// @module: Caption manifest extraction and track selection

// @const: Coarse presence check for caption data in a page
pub const CAPTION_MARKER: &str = "captionTracks";

// @const: Manifest key followed by the opening bracket of its array
static MANIFEST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""captionTracks"\s*:\s*\["#).unwrap()
});

// Fields of an unexpected shape read as absent instead of failing the manifest
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Display name of a track as the page advertises it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    #[serde(default, deserialize_with = "lenient")]
    pub simple_text: Option<String>,
}

/// One selectable caption track advertised by a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrackRef {
    /// Download URL of the transcript document
    #[serde(default, deserialize_with = "lenient")]
    pub base_url: Option<String>,

    /// Language/variant identifier, e.g. `.en` or `a.en`
    #[serde(default, deserialize_with = "lenient")]
    pub vss_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub language_code: Option<String>,

    /// `asr` for speech-recognition tracks
    #[serde(default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<TrackName>,
}

impl CaptionTrackRef {
    /// Creates a track reference from its two essential fields
    pub fn new(base_url: impl Into<String>, vss_id: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            vss_id: Some(vss_id.into()),
            ..Default::default()
        }
    }

    /// Base URL if present and non-blank
    pub fn usable_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn is_auto_generated(&self) -> bool {
        match self.vss_id.as_deref().and_then(language_utils::parse_vss_id) {
            Some(parsed) => parsed.auto_generated,
            None => self.kind.as_deref() == Some("asr"),
        }
    }

    /// Language tag from the vssId, falling back to `languageCode`
    pub fn language_tag(&self) -> Option<&str> {
        self.vss_id
            .as_deref()
            .and_then(language_utils::parse_vss_id)
            .map(|parsed| parsed.tag)
            .or(self.language_code.as_deref())
    }

    /// English name of the track's base language, when it is a known ISO code
    pub fn language_name(&self) -> Option<String> {
        self.language_tag()
            .and_then(|tag| language_utils::get_language_name(tag).ok())
    }
}

/// Locate and decode the caption-track manifest embedded in page markup
///
/// Only the marker and the manifest array are examined; the rest of the page is
/// never parsed. Records lacking `baseUrl` or `vssId` are kept; selection
/// decides whether they are usable.
pub fn extract_caption_tracks(markup: &str) -> Result<Vec<CaptionTrackRef>, CaptionLookupError> {
    if !markup.contains(CAPTION_MARKER) {
        return Err(CaptionLookupError::MarkerMissing);
    }

    let found = MANIFEST_REGEX
        .find(markup)
        .ok_or(CaptionLookupError::ManifestUnmatched)?;

    // Start at the '[' so the deserializer consumes exactly one array value
    let array_start = found.end() - 1;
    let mut stream = serde_json::Deserializer::from_str(&markup[array_start..])
        .into_iter::<Vec<CaptionTrackRef>>();

    match stream.next() {
        Some(Ok(tracks)) => Ok(tracks),
        Some(Err(e)) => Err(CaptionLookupError::ManifestInvalid(e.to_string())),
        None => Err(CaptionLookupError::ManifestInvalid("empty manifest".to_string())),
    }
}

/// Pick the best track for a language
///
/// Precedence, first match in sequence order within each tier:
/// 1. vssId equals `.{lang}` (manual captions)
/// 2. vssId equals `a.{lang}` (automatic captions)
/// 3. vssId contains `.{lang}` (regional variants such as `.en-US`)
///
/// A matched track without a usable URL is reported as such; later candidates are
/// not tried.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrackRef],
    lang: &str,
) -> Result<&'a CaptionTrackRef, CaptionLookupError> {
    let manual = format!(".{}", lang);
    let automatic = format!("a.{}", lang);

    let selected = tracks
        .iter()
        .find(|t| t.vss_id.as_deref() == Some(manual.as_str()))
        .or_else(|| tracks.iter().find(|t| t.vss_id.as_deref() == Some(automatic.as_str())))
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.vss_id.as_deref().is_some_and(|id| id.contains(&manual)))
        })
        .ok_or_else(|| CaptionLookupError::NoMatchingTrack { lang: lang.to_string() })?;

    if selected.usable_url().is_none() {
        return Err(CaptionLookupError::MissingBaseUrl {
            vss_id: selected.vss_id.clone().unwrap_or_default(),
        });
    }

    Ok(selected)
}

/// vssIds of all tracks in manifest order, skipping records without one
pub fn available_languages(tracks: &[CaptionTrackRef]) -> Vec<&str> {
    tracks.iter().filter_map(|t| t.vss_id.as_deref()).collect()
}

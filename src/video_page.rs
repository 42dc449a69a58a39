use once_cell::sync::Lazy;
use regex::Regex;

// @module: Watch-page addressing and metadata

// @const: Video id inside the common URL shapes (watch, /v/, short links, embeds, shorts)
static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|/v/|youtu\.be/|/embed/|/shorts/)([A-Za-z0-9_-]+)").unwrap()
});

// @const: A bare video id
static BARE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").unwrap()
});

static TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name="title"\s+content="([^"]*)""#).unwrap()
});

static DESCRIPTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name="description"\s+content="([^"]*)""#).unwrap()
});

/// Resolve a video id from either a bare id or a video URL
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if BARE_ID_REGEX.is_match(input) {
        return Some(input.to_string());
    }

    VIDEO_ID_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical watch-page URL on the given host
pub fn watch_url(host: &str, video_id: &str) -> String {
    format!("https://{}/watch?v={}", host, video_id)
}

/// Content of `<meta name="title">`, entity-decoded
pub fn extract_title(markup: &str) -> Option<String> {
    meta_content(&TITLE_REGEX, markup)
}

/// Content of `<meta name="description">`, entity-decoded
pub fn extract_description(markup: &str) -> Option<String> {
    meta_content(&DESCRIPTION_REGEX, markup)
}

fn meta_content(pattern: &Regex, markup: &str) -> Option<String> {
    pattern
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
}

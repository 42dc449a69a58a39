/*!
 * Language utilities for caption track identifiers.
 *
 * Caption tracks are tagged with a vssId of the form `[a.]<lang>[-<region>]`, for
 * example `.en`, `a.en` or `.pt-BR`. This module splits those identifiers apart and
 * resolves the base language against ISO 639 tables.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Parsed form of a vssId
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VssId<'a> {
    /// Whether the track was generated automatically (`a.` prefix)
    pub auto_generated: bool,
    /// Language tag after the prefix, e.g. `en` or `pt-BR`
    pub tag: &'a str,
}

/// Split a vssId into its auto-generated flag and language tag
///
/// Returns `None` when the identifier has neither the `.` nor the `a.` prefix.
pub fn parse_vss_id(vss_id: &str) -> Option<VssId<'_>> {
    if let Some(tag) = vss_id.strip_prefix("a.") {
        return Some(VssId { auto_generated: true, tag });
    }
    vss_id
        .strip_prefix('.')
        .map(|tag| VssId { auto_generated: false, tag })
}

/// Base language subtag of a language tag (`pt-BR` -> `pt`)
pub fn base_language(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

// ISO 639-2/B codes that differ from their 639-2/T counterpart
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

fn lookup(code: &str) -> Option<Language> {
    let code = code.trim().to_lowercase();
    match code.len() {
        2 => Language::from_639_1(&code),
        3 => bibliographic_to_terminology(&code)
            .and_then(Language::from_639_3)
            .or_else(|| Language::from_639_3(&code)),
        _ => None,
    }
}

/// Check that a language tag starts with a known ISO 639-1 or 639-2 code
///
/// Region subtags are not checked, so `en-US` and `en-XX` are both accepted.
pub fn validate_language_tag(tag: &str) -> Result<()> {
    lookup(base_language(tag))
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", tag))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    lookup(code)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language tags share the same base language
pub fn language_codes_match(tag1: &str, tag2: &str) -> bool {
    match (lookup(base_language(tag1)), lookup(base_language(tag2))) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// English name of the base language of a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let lang = lookup(base_language(tag))
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", tag))?;
    Ok(lang.to_name().to_string())
}

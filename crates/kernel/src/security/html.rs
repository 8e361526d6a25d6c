//! Escaping and markup stripping for text content.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `<script>`/`<style>` elements including their bodies.
#[allow(clippy::expect_used)]
static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)\s*>").expect("valid regex literal")
});

/// Matches any remaining tag, including unterminated ones at end of input.
#[allow(clippy::expect_used)]
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*(>|$)").expect("valid regex literal"));

/// Character references a host may already have applied to plain text.
#[allow(clippy::expect_used)]
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(amp|lt|gt|quot|apos|nbsp));")
        .expect("valid regex literal")
});

/// Decode numeric and basic named character references in one pass.
///
/// Unknown names and invalid code points are left as written, so the result
/// escapes back to the same text with [`esc_html`].
pub fn decode_entities(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("amp") => Some('&'),
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    Some("nbsp") => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded
                .filter(|c| *c != '\0')
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Escape text for use between tags.
pub fn esc_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape text for use inside a double-quoted attribute value.
pub fn esc_attr(s: &str) -> String {
    esc_html(s).replace('`', "&#x60;")
}

/// Remove all markup from `input`, dropping script and style bodies entirely.
pub fn strip_tags(input: &str) -> String {
    let without_code = SCRIPT_STYLE.replace_all(input, "");
    ANY_TAG.replace_all(&without_code, "").trim().to_string()
}

/// Clean a rich HTML fragment, keeping at most `max_chars` characters of input.
///
/// The input is truncated on a character boundary before cleaning so that
/// ammonia closes any element the cut left open.
pub fn sanitize_html_content(input: &str, max_chars: usize) -> String {
    let bounded: String = input.chars().take(max_chars).collect();
    ammonia::clean(&bounded)
}

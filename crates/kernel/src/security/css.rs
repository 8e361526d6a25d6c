//! CSS class-name sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Default ceiling on a single class token.
pub const DEFAULT_MAX_CLASS_LENGTH: usize = 64;

#[allow(clippy::expect_used)]
static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex literal"));

/// Reduce one class token to `[A-Za-z0-9_-]`, dropping percent-encoded octets.
pub fn sanitize_html_class(token: &str) -> String {
    PERCENT_OCTET
        .replace_all(token, "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Sanitize a list of class strings (each may hold several space-separated
/// tokens). Empty and over-long tokens are dropped; order of first
/// appearance is kept and duplicates removed.
pub fn sanitize_css_classes<I, S>(classes: I, max_len: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for class in classes {
        for token in class.as_ref().split_whitespace() {
            let clean = sanitize_html_class(token);
            if clean.is_empty() || clean.len() > max_len || out.contains(&clean) {
                continue;
            }
            out.push(clean);
        }
    }
    out
}

/// Sanitize a space-separated class attribute value.
pub fn sanitize_css_class(raw: &str, max_len: usize) -> String {
    sanitize_css_classes([raw], max_len).join(" ")
}

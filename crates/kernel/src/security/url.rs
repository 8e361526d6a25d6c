//! URL sanitization with protocol allow-listing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Link target used whenever a URL is rejected.
pub const PLACEHOLDER_URL: &str = "#";

/// Default ceiling on URL length (bytes, after trimming).
pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;

/// Protocols accepted when the caller does not configure its own list.
pub const DEFAULT_PROTOCOLS: &[&str] = &["http", "https", "mailto", "tel"];

/// Dangerous schemes and embedded-markup patterns rejected in strict mode.
#[allow(clippy::expect_used)]
static BLOCKED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)javascript\s*:",
        r"(?i)vbscript\s*:",
        r"(?i)livescript\s*:",
        r"(?i)data\s*:",
        r#"(?i)(^|["'\s])on[a-z]+\s*="#,
        r"(?i)<\s*/?\s*(script|iframe|object|embed|svg|style)",
        r"(?i)expression\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex literal"))
    .collect()
});

#[allow(clippy::expect_used)]
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid regex literal"));

/// Site-wide URL policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPolicy {
    /// Schemes accepted for absolute URLs (lowercase).
    pub allowed_protocols: Vec<String>,
    /// Longest accepted URL, in bytes after trimming.
    pub max_length: usize,
    /// Reject URLs matching the dangerous-pattern block-list.
    pub strict: bool,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self {
            allowed_protocols: DEFAULT_PROTOCOLS.iter().map(|p| (*p).to_string()).collect(),
            max_length: DEFAULT_MAX_URL_LENGTH,
            strict: true,
        }
    }
}

impl UrlPolicy {
    fn allows(&self, scheme: &str) -> bool {
        self.allowed_protocols
            .iter()
            .any(|p| p.eq_ignore_ascii_case(scheme))
    }
}

/// Characters allowed to survive in an emitted URL. Everything else is removed.
///
/// Non-ASCII text survives, except whitespace and control characters, so a
/// cleaned URL never gains leading or trailing whitespace.
fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
        || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}

/// A colon ahead of the first path, query or fragment delimiter that did not
/// parse as a scheme.
fn has_malformed_scheme(candidate: &str) -> bool {
    let head = candidate.split(['/', '?', '#']).next().unwrap_or_default();
    head.contains(':')
}

fn is_blocked(candidate: &str) -> bool {
    BLOCKED_PATTERNS.iter().any(|re| re.is_match(candidate))
}

/// Sanitize a host-supplied URL.
///
/// Never fails: any rejection yields [`PLACEHOLDER_URL`]. Relative references
/// (no scheme) skip protocol validation. Applying the function to its own
/// output returns the output unchanged.
pub fn sanitize_url(raw: &str, policy: &UrlPolicy) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > policy.max_length {
        return PLACEHOLDER_URL.to_string();
    }
    if policy.strict && is_blocked(trimmed) {
        debug!(url = %trimmed, "url rejected by block-list");
        return PLACEHOLDER_URL.to_string();
    }

    let cleaned: String = trimmed.chars().filter(|c| is_url_char(*c)).collect();
    // Removing characters can join a pattern back together.
    if cleaned.is_empty() || (policy.strict && is_blocked(&cleaned)) {
        return PLACEHOLDER_URL.to_string();
    }

    let Some(caps) = SCHEME.captures(&cleaned) else {
        if has_malformed_scheme(&cleaned) {
            debug!(url = %cleaned, "url rejected: unparseable scheme");
            return PLACEHOLDER_URL.to_string();
        }
        return cleaned;
    };
    let scheme = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    if !policy.allows(scheme) {
        debug!(url = %cleaned, scheme = %scheme, "url rejected: protocol not allowed");
        return PLACEHOLDER_URL.to_string();
    }

    if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        let parsed = ::url::Url::parse(&cleaned);
        if !parsed.is_ok_and(|u| u.host_str().is_some_and(|h| !h.is_empty())) {
            return PLACEHOLDER_URL.to_string();
        }
    }

    cleaned
}

/// Memoizing wrapper around [`sanitize_url`], scoped to one render.
#[derive(Debug, Clone, Default)]
pub struct UrlSanitizer {
    policy: UrlPolicy,
    memo: HashMap<String, String>,
    hits: usize,
}

impl UrlSanitizer {
    /// Create a sanitizer enforcing `policy`.
    pub fn new(policy: UrlPolicy) -> Self {
        Self {
            policy,
            memo: HashMap::new(),
            hits: 0,
        }
    }

    /// The policy being enforced.
    pub fn policy(&self) -> &UrlPolicy {
        &self.policy
    }

    /// Sanitize `raw`, reusing the result for repeated inputs.
    pub fn sanitize(&mut self, raw: &str) -> String {
        if let Some(hit) = self.memo.get(raw) {
            self.hits += 1;
            return hit.clone();
        }
        let clean = sanitize_url(raw, &self.policy);
        self.memo.insert(raw.to_string(), clean.clone());
        clean
    }

    /// Number of memo hits since creation or the last [`clear`](Self::clear).
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Drop memoized results.
    pub fn clear(&mut self) {
        self.memo.clear();
        self.hits = 0;
    }
}

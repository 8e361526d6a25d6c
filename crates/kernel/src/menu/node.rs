//! Immutable, sanitized view of one navigation item.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::content::FilterPipeline;
use crate::security::{
    UrlSanitizer, decode_entities, esc_attr, esc_html, sanitize_css_classes, sanitize_html_class,
    sanitize_html_content, strip_tags,
};

use super::icon::{IconSource, extract_icon};
use super::item::{HAS_CHILDREN_CLASS, RawMenuItem};
use super::options::RenderOptions;

pub const CURRENT_CLASS: &str = "current-menu-item";
pub const CURRENT_ANCESTOR_CLASS: &str = "current-menu-ancestor";
pub const CURRENT_PARENT_CLASS: &str = "current-menu-parent";

/// Targets a link may carry; anything else is dropped.
const ALLOWED_TARGETS: &[&str] = &["_blank", "_self", "_parent", "_top"];

/// A navigation item ready for markup.
///
/// Every string field is already sanitized and escaped for the position it
/// is emitted in, so strategies interpolate them as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuNode {
    id: u64,
    title: String,
    url: String,
    classes: Vec<String>,
    target: Option<String>,
    rel: Option<String>,
    tooltip: Option<String>,
    description: Option<String>,
    parent_id: u64,
    depth: usize,
    has_children: bool,
    is_current: bool,
    is_current_ancestor: bool,
    is_current_parent: bool,
    icon: Option<String>,
}

impl MenuNode {
    /// Build a node from a raw host item at `depth`.
    pub fn from_raw(
        raw: &RawMenuItem,
        depth: usize,
        options: &RenderOptions,
        filters: &FilterPipeline,
        urls: &mut UrlSanitizer,
    ) -> Self {
        let max_class = options.count("max_class_length").max(1);

        // Hosts may hand over titles already entity-encoded.
        let title = esc_html(&decode_entities(&strip_tags(&filters.process(&raw.title))));
        let url = esc_attr(&urls.sanitize(&raw.url));

        let has = |marker: &str| raw.classes.iter().any(|c| c == marker);
        let has_children = has(HAS_CHILDREN_CLASS);
        let is_current = raw.current || has(CURRENT_CLASS);
        let is_current_ancestor = raw.current_item_ancestor || has(CURRENT_ANCESTOR_CLASS);
        let is_current_parent = raw.current_item_parent || has(CURRENT_PARENT_CLASS);

        let filtered_tooltip = filters.process(&raw.attr_title);
        let mut class_source = raw.classes.clone();
        let mut tooltip = Some(filtered_tooltip.as_str());
        let icon = match extract_icon(&filtered_tooltip, &raw.classes) {
            Some((icon, IconSource::Tooltip)) => {
                tooltip = None;
                Some(icon)
            }
            Some((icon, IconSource::Class(idx))) => {
                class_source.remove(idx);
                Some(icon)
            }
            None => {
                // A rejected icon-looking tooltip is not shown as a tooltip either.
                if filtered_tooltip.contains(super::icon::ICON_MARKER) {
                    tooltip = None;
                }
                None
            }
        };
        let tooltip = tooltip
            .map(strip_tags)
            .filter(|t| !t.is_empty())
            .map(|t| esc_attr(&decode_entities(&t)));

        let target = Some(raw.target.trim())
            .filter(|t| ALLOWED_TARGETS.contains(t))
            .map(str::to_string);

        let mut rel_tokens: Vec<String> = raw
            .xfn
            .split_whitespace()
            .map(|t| sanitize_html_class(t).to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if target.as_deref() == Some("_blank") {
            rel_tokens.extend(["noopener".to_string(), "noreferrer".to_string()]);
        }
        let mut rel: Vec<String> = Vec::new();
        for token in rel_tokens {
            if !rel.contains(&token) {
                rel.push(token);
            }
        }
        let rel = (!rel.is_empty()).then(|| rel.join(" "));

        let description = Some(raw.description.trim())
            .filter(|d| !d.is_empty())
            .map(|d| sanitize_html_content(d, options.count("description_length")))
            .filter(|d| !d.is_empty());

        Self {
            id: raw.id,
            title,
            url,
            classes: sanitize_css_classes(&class_source, max_class),
            target,
            rel,
            tooltip,
            description,
            parent_id: raw.menu_item_parent,
            depth,
            has_children,
            is_current,
            is_current_ancestor,
            is_current_parent,
            icon,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Escaped label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sanitized, attribute-escaped destination.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Cleaned HTML description, bounded by `description_length`.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent_id(&self) -> u64 {
        self.parent_id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn is_current_ancestor(&self) -> bool {
        self.is_current_ancestor
    }

    pub fn is_current_parent(&self) -> bool {
        self.is_current_parent
    }

    /// Current item or on the path to it.
    pub fn is_active(&self) -> bool {
        self.is_current || self.is_current_ancestor || self.is_current_parent
    }

    /// Lies above the current item.
    pub fn is_active_branch(&self) -> bool {
        self.is_current_ancestor || self.is_current_parent
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Hash over every field, used to key cached fragments.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::options::base_defaults;
    use crate::security::{PLACEHOLDER_URL, UrlPolicy};

    fn build(raw: &RawMenuItem) -> MenuNode {
        let options = RenderOptions::from_defaults("simple", &base_defaults());
        let mut urls = UrlSanitizer::new(UrlPolicy::default());
        MenuNode::from_raw(raw, 0, &options, &FilterPipeline::standard(), &mut urls)
    }

    #[test]
    fn title_is_stripped_and_escaped() {
        let raw = RawMenuItem::new(1, "  <b>Tom & Jerry</b> <script>x()</script>", "/");
        assert_eq!(build(&raw).title(), "Tom &amp; Jerry");
    }

    #[test]
    fn encoded_title_is_not_double_escaped() {
        let raw = RawMenuItem::new(1, "Tom &amp; Jerry", "/");
        assert_eq!(build(&raw).title(), "Tom &amp; Jerry");
        let raw = RawMenuItem::new(2, "&lt;b&gt;Bold&lt;/b&gt; &#8220;deals&#8221;", "/");
        assert_eq!(build(&raw).title(), "&lt;b&gt;Bold&lt;/b&gt; \u{201c}deals\u{201d}");
        let mut raw = RawMenuItem::new(3, "Q", "/");
        raw.attr_title = "Fish &amp; Chips".into();
        assert_eq!(build(&raw).tooltip(), Some("Fish &amp; Chips"));
    }

    #[test]
    fn bad_url_becomes_placeholder() {
        let raw = RawMenuItem::new(1, "Bad", "javascript:alert(1)");
        assert_eq!(build(&raw).url(), PLACEHOLDER_URL);
        let raw = RawMenuItem::new(2, "Empty", "");
        assert_eq!(build(&raw).url(), PLACEHOLDER_URL);
    }

    #[test]
    fn url_is_attribute_escaped() {
        let raw = RawMenuItem::new(1, "Q", "/search?a=1&b=2");
        assert_eq!(build(&raw).url(), "/search?a=1&amp;b=2");
    }

    #[test]
    fn flags_come_from_classes_or_booleans() {
        let mut raw = RawMenuItem::new(1, "A", "/");
        raw.classes = vec!["current-menu-ancestor".into(), HAS_CHILDREN_CLASS.into()];
        raw.current_item_parent = true;
        let node = build(&raw);
        assert!(node.has_children());
        assert!(node.is_current_ancestor());
        assert!(node.is_current_parent());
        assert!(!node.is_current());
        assert!(node.is_active_branch());
    }

    #[test]
    fn classes_deduplicated_and_sanitized() {
        let mut raw = RawMenuItem::new(1, "A", "/");
        raw.classes = vec!["menu-item".into(), "menu-item".into(), "x\"><y".into(), "".into()];
        assert_eq!(build(&raw).classes(), &["menu-item".to_string(), "xy".to_string()]);
    }

    #[test]
    fn tooltip_icon_extracted_and_not_used_as_tooltip() {
        let mut raw = RawMenuItem::new(1, "Home", "/");
        raw.attr_title = "fa-home".into();
        let node = build(&raw);
        assert_eq!(node.icon(), Some("fa fa-home"));
        assert_eq!(node.tooltip(), None);
    }

    #[test]
    fn script_tooltip_yields_no_icon() {
        let mut raw = RawMenuItem::new(1, "Home", "/");
        raw.attr_title = "javascript:alert(1)".into();
        let node = build(&raw);
        assert_eq!(node.icon(), None);
        assert_eq!(node.tooltip(), Some("javascript:alert(1)"));
    }

    #[test]
    fn class_icon_removed_from_classes() {
        let mut raw = RawMenuItem::new(1, "Cart", "/cart");
        raw.classes = vec!["fa-cart".into(), "menu-item".into()];
        let node = build(&raw);
        assert_eq!(node.icon(), Some("fa fa-cart"));
        assert_eq!(node.classes(), &["menu-item".to_string()]);
    }

    #[test]
    fn target_and_rel_hardened() {
        let mut raw = RawMenuItem::new(1, "Ext", "https://example.com");
        raw.target = "_blank".into();
        raw.xfn = "Friend friend".into();
        let node = build(&raw);
        assert_eq!(node.target(), Some("_blank"));
        assert_eq!(node.rel(), Some("friend noopener noreferrer"));

        raw.target = "\" onclick=\"x".into();
        raw.xfn = String::new();
        let node = build(&raw);
        assert_eq!(node.target(), None);
        assert_eq!(node.rel(), None);
    }

    #[test]
    fn description_cleaned_and_bounded() {
        let mut raw = RawMenuItem::new(1, "A", "/");
        raw.description = format!("<em>Hi</em><script>x</script>{}", "z".repeat(400));
        let node = build(&raw);
        let description = node.description().unwrap();
        assert!(description.starts_with("<em>Hi</em>"));
        assert!(!description.contains("script"));
        assert!(description.len() < 200);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = build(&RawMenuItem::new(1, "A", "/"));
        let b = build(&RawMenuItem::new(1, "B", "/"));
        assert_eq!(a.fingerprint(), build(&RawMenuItem::new(1, "A", "/")).fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}

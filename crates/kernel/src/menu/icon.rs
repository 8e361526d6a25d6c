//! Icon token extraction from tooltip attributes and classes.

/// Substring that marks an icon token.
pub const ICON_MARKER: &str = "fa-";

/// Base prefix every emitted icon token carries.
pub const ICON_BASE: &str = "fa";

/// Icon families accepted as an existing prefix.
const ICON_FAMILIES: &[&str] = &["fa", "fas", "far", "fab", "fal", "fad"];

/// Where an icon token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Tooltip,
    /// Index into the item's class list.
    Class(usize),
}

/// Extract the icon token for an item.
///
/// The tooltip wins when it contains [`ICON_MARKER`]; otherwise the first
/// class starting with the marker is used. A token containing anything
/// outside `[A-Za-z0-9- ]` is treated as absent.
pub fn extract_icon(tooltip: &str, classes: &[String]) -> Option<(String, IconSource)> {
    if tooltip.contains(ICON_MARKER) {
        return normalize_icon(tooltip).map(|icon| (icon, IconSource::Tooltip));
    }
    classes
        .iter()
        .position(|c| c.starts_with(ICON_MARKER))
        .and_then(|idx| normalize_icon(&classes[idx]).map(|icon| (icon, IconSource::Class(idx))))
}

/// Ensure the base prefix is present and validate the character set.
pub fn normalize_icon(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if token.is_empty() {
        return None;
    }
    let has_family = token
        .split(' ')
        .next()
        .is_some_and(|first| ICON_FAMILIES.contains(&first));
    let token = if has_family {
        token
    } else {
        format!("{ICON_BASE} {token}")
    };
    let valid = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ');
    valid.then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_icon_gets_base_prefix() {
        let (icon, source) = extract_icon("fa-home", &[]).unwrap();
        assert_eq!(icon, "fa fa-home");
        assert_eq!(source, IconSource::Tooltip);
    }

    #[test]
    fn existing_family_prefix_kept() {
        assert_eq!(normalize_icon("fab fa-github").as_deref(), Some("fab fa-github"));
        assert_eq!(normalize_icon("fa  fa-home ").as_deref(), Some("fa fa-home"));
    }

    #[test]
    fn script_tooltip_yields_no_icon() {
        assert_eq!(extract_icon("javascript:alert(1)", &[]), None);
        assert_eq!(normalize_icon("javascript:alert(1)"), None);
    }

    #[test]
    fn malformed_marker_tooltip_rejected() {
        assert_eq!(extract_icon("fa-home\" onmouseover=\"x", &[]), None);
    }

    #[test]
    fn class_icon_used_when_tooltip_has_none() {
        let classes = vec!["menu-item".to_string(), "fa-cart".to_string(), "fa-star".to_string()];
        assert_eq!(
            extract_icon("Shopping cart", &classes),
            Some(("fa fa-cart".to_string(), IconSource::Class(1)))
        );
    }

    #[test]
    fn tooltip_takes_precedence_over_class() {
        let classes = vec!["fa-cart".to_string()];
        assert_eq!(
            extract_icon("fa-user", &classes),
            Some(("fa fa-user".to_string(), IconSource::Tooltip))
        );
    }
}

//! menuwalk test utilities.
//!
//! Helpers for integration testing: menu item fixtures serialized the way
//! the host stores them, sample trees, and assertion helpers for inspecting
//! rendered markup.

use serde_json::{Value as JsonValue, json};

/// Create a test menu item with default values.
pub fn test_item(id: u64, title: &str) -> TestItem {
    TestItem {
        id,
        title: title.to_string(),
        url: format!("/{}", title.to_lowercase().replace(' ', "-")),
        classes: Vec::new(),
        target: String::new(),
        xfn: String::new(),
        attr_title: String::new(),
        description: String::new(),
        parent: 0,
        order: 0,
        current: false,
        current_ancestor: false,
        current_parent: false,
        children: Vec::new(),
    }
}

/// A menu item builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestItem {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub classes: Vec<String>,
    pub target: String,
    pub xfn: String,
    pub attr_title: String,
    pub description: String,
    pub parent: u64,
    pub order: i32,
    pub current: bool,
    pub current_ancestor: bool,
    pub current_parent: bool,
    pub children: Vec<TestItem>,
}

impl TestItem {
    /// Set the link destination.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Add a CSS class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set the tooltip attribute.
    pub fn with_attr_title(mut self, attr_title: &str) -> Self {
        self.attr_title = attr_title.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    pub fn with_xfn(mut self, xfn: &str) -> Self {
        self.xfn = xfn.to_string();
        self
    }

    /// Set the parent id and sort order (flat form).
    pub fn under(mut self, parent: u64, order: i32) -> Self {
        self.parent = parent;
        self.order = order;
        self
    }

    /// Mark as the current page.
    pub fn current(mut self) -> Self {
        self.current = true;
        self
    }

    /// Mark as an ancestor of the current page.
    pub fn current_ancestor(mut self) -> Self {
        self.current_ancestor = true;
        self
    }

    /// Mark as the parent of the current page.
    pub fn current_parent(mut self) -> Self {
        self.current_parent = true;
        self
    }

    /// Nest children (nested form).
    pub fn with_children(mut self, children: Vec<TestItem>) -> Self {
        self.children = children;
        self
    }

    /// Serialize to the host's JSON record.
    pub fn to_json(&self) -> JsonValue {
        let mut value = json!({
            "id": self.id,
            "title": self.title,
            "url": self.url,
            "classes": self.classes,
            "target": self.target,
            "xfn": self.xfn,
            "attr_title": self.attr_title,
            "description": self.description,
            "menu_item_parent": self.parent,
            "menu_order": self.order,
            "current": self.current,
            "current_item_ancestor": self.current_ancestor,
            "current_item_parent": self.current_parent,
        });
        if !self.children.is_empty()
            && let Some(obj) = value.as_object_mut()
        {
            obj.insert(
                "children".to_string(),
                JsonValue::Array(self.children.iter().map(TestItem::to_json).collect()),
            );
        }
        value
    }
}

/// Serialize a list of items as a JSON array.
pub fn tree_json(items: &[TestItem]) -> JsonValue {
    JsonValue::Array(items.iter().map(TestItem::to_json).collect())
}

/// Sample trees used across tests.
pub mod trees {
    use super::{TestItem, test_item};

    /// `[Home, Shop[Shoes, Hats]]`.
    pub fn shop() -> Vec<TestItem> {
        vec![
            test_item(1, "Home").with_url("/"),
            test_item(2, "Shop").with_children(vec![
                test_item(3, "Shoes"),
                test_item(4, "Hats"),
            ]),
        ]
    }

    /// A parent with `count` leaf children, ids starting at 100.
    pub fn wide(count: u64) -> Vec<TestItem> {
        let children = (0..count)
            .map(|i| test_item(100 + i, &format!("Child {i}")))
            .collect();
        vec![test_item(1, "Products").with_children(children)]
    }

    /// Three levels with the current page at the bottom of the second branch.
    pub fn deep_current() -> Vec<TestItem> {
        vec![
            test_item(1, "About").with_children(vec![test_item(2, "Team")]),
            test_item(10, "Docs").current_ancestor().with_children(vec![
                test_item(11, "Guides").current_parent().with_children(vec![
                    test_item(12, "Install").current(),
                    test_item(13, "Upgrade"),
                ]),
                test_item(14, "Reference"),
            ]),
        ]
    }

    /// Flat, parent-linked form of [`shop`] in shuffled order.
    pub fn shop_flat() -> Vec<TestItem> {
        vec![
            test_item(4, "Hats").under(2, 2),
            test_item(2, "Shop").under(0, 2),
            test_item(3, "Shoes").under(2, 1),
            test_item(1, "Home").with_url("/").under(0, 1),
        ]
    }
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Value of attribute `attr` on the first tag containing `marker`.
pub fn extract_attr(html: &str, marker: &str, attr: &str) -> Option<String> {
    let at = html.find(marker)?;
    let start = html[..=at].rfind('<')?;
    let end = at + html[at..].find('>')?;
    let tag = &html[start..end];
    let pattern = format!(" {attr}=\"");
    let value_start = tag.find(&pattern)? + pattern.len();
    let value_len = tag[value_start..].find('"')?;
    Some(tag[value_start..value_start + value_len].to_string())
}

/// Text inside every `<span class="menu-text">`, in document order.
pub fn link_texts(html: &str) -> Vec<String> {
    const OPEN: &str = "<span class=\"menu-text\">";
    html.split(OPEN)
        .skip(1)
        .filter_map(|rest| rest.split("</span>").next())
        .map(str::to_string)
        .collect()
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `needles` occur in `haystack` in the given order.
    pub fn in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("Expected '{needle}' after byte {from}\nActual: {haystack}"),
            }
        }
    }
}

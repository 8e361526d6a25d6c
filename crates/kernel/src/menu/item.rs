//! Raw navigation items as supplied by the host, and tree assembly.
//!
//! The host stores menus as a flat list of links where each link names its
//! parent. Before a traversal the list is assembled into a nested tree whose
//! items carry the `menu-item-has-children` marker class, mirroring what the
//! host does before it hands a menu to a walker.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MenuResult;

/// Marker class the host attaches to items that own children.
pub const HAS_CHILDREN_CLASS: &str = "menu-item-has-children";

/// Parent id of top-level items.
pub const ROOT_PARENT: u64 = 0;

/// One navigation link record from the host data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMenuItem {
    /// Host-assigned id, unique within one menu.
    pub id: u64,
    /// Label, possibly containing markup.
    #[serde(default)]
    pub title: String,
    /// Destination as stored by the host (unsanitized).
    #[serde(default)]
    pub url: String,
    /// CSS classes, including host marker classes.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Link target (`_blank`, ...).
    #[serde(default)]
    pub target: String,
    /// Link relationship (XFN) tokens.
    #[serde(default)]
    pub xfn: String,
    /// Tooltip; may also carry an icon token.
    #[serde(default)]
    pub attr_title: String,
    /// Free-form description, may contain markup.
    #[serde(default)]
    pub description: String,
    /// Parent item id, [`ROOT_PARENT`] for top-level items.
    #[serde(default)]
    pub menu_item_parent: u64,
    /// Sort position among siblings.
    #[serde(default)]
    pub menu_order: i32,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub current_item_ancestor: bool,
    #[serde(default)]
    pub current_item_parent: bool,
    /// Nested children (empty in flat form).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawMenuItem>,
}

impl RawMenuItem {
    /// Create an item with an id, title and url; everything else default.
    pub fn new(id: u64, title: &str, url: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Whether the host marked this item as owning children.
    pub fn has_children_marker(&self) -> bool {
        self.classes.iter().any(|c| c == HAS_CHILDREN_CLASS)
    }

    fn mark_has_children(&mut self) {
        if !self.has_children_marker() {
            self.classes.push(HAS_CHILDREN_CLASS.to_string());
        }
    }
}

/// A menu assembled into traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    roots: Vec<RawMenuItem>,
}

impl MenuTree {
    /// Use already nested items as-is, normalizing parent ids and markers.
    pub fn from_nested(mut roots: Vec<RawMenuItem>) -> Self {
        for root in &mut roots {
            normalize(root, ROOT_PARENT);
        }
        Self { roots }
    }

    /// Assemble a tree from the host's flat, parent-linked list.
    ///
    /// Siblings are ordered by `menu_order` (stable). Items whose parent is
    /// missing are promoted to the top level; items caught in a parent cycle
    /// are dropped.
    pub fn from_flat(items: Vec<RawMenuItem>) -> Self {
        let known: HashSet<u64> = items.iter().map(|i| i.id).collect();
        let total = items.len();

        let mut roots = Vec::new();
        let mut groups: HashMap<u64, Vec<RawMenuItem>> = HashMap::new();
        for mut item in items {
            if item.menu_item_parent == ROOT_PARENT {
                roots.push(item);
            } else if !known.contains(&item.menu_item_parent) || item.menu_item_parent == item.id {
                warn!(
                    id = item.id,
                    parent = item.menu_item_parent,
                    "menu item parent missing, promoting to top level"
                );
                item.menu_item_parent = ROOT_PARENT;
                roots.push(item);
            } else {
                groups.entry(item.menu_item_parent).or_default().push(item);
            }
        }

        roots.sort_by_key(|i| i.menu_order);
        let mut placed = roots.len();
        for root in &mut roots {
            placed += attach_children(root, &mut groups);
        }

        if placed < total {
            warn!(dropped = total - placed, "menu items unreachable from the top level");
        }

        Self { roots }
    }

    /// Parse a JSON array of items, nested or flat.
    pub fn from_json(json: &str) -> MenuResult<Self> {
        let items: Vec<RawMenuItem> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    /// Same as [`from_json`](Self::from_json) for an already parsed value.
    pub fn from_value(value: serde_json::Value) -> MenuResult<Self> {
        let items: Vec<RawMenuItem> = serde_json::from_value(value)?;
        Ok(Self::from_items(items))
    }

    fn from_items(items: Vec<RawMenuItem>) -> Self {
        if items.iter().any(|i| !i.children.is_empty()) {
            Self::from_nested(items)
        } else {
            Self::from_flat(items)
        }
    }

    /// Top-level items in sibling order.
    pub fn roots(&self) -> &[RawMenuItem] {
        &self.roots
    }

    /// Total number of items in the tree.
    pub fn len(&self) -> usize {
        fn count(items: &[RawMenuItem]) -> usize {
            items.iter().map(|i| 1 + count(&i.children)).sum()
        }
        count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn normalize(item: &mut RawMenuItem, parent: u64) {
    item.menu_item_parent = parent;
    if !item.children.is_empty() {
        item.mark_has_children();
    }
    let id = item.id;
    for child in &mut item.children {
        normalize(child, id);
    }
}

/// Move this item's children out of `groups`, recursively. Returns the
/// number of descendants placed.
fn attach_children(item: &mut RawMenuItem, groups: &mut HashMap<u64, Vec<RawMenuItem>>) -> usize {
    let Some(mut children) = groups.remove(&item.id) else {
        return 0;
    };
    children.sort_by_key(|c| c.menu_order);
    let mut placed = children.len();
    for child in &mut children {
        placed += attach_children(child, groups);
    }
    item.mark_has_children();
    item.children = children;
    placed
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn flat(id: u64, parent: u64, order: i32) -> RawMenuItem {
        RawMenuItem {
            menu_item_parent: parent,
            menu_order: order,
            ..RawMenuItem::new(id, &format!("Item {id}"), "/")
        }
    }

    #[test]
    fn from_flat_builds_hierarchy() {
        let tree = MenuTree::from_flat(vec![flat(1, 0, 1), flat(2, 0, 2), flat(3, 2, 1), flat(4, 2, 2)]);
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.len(), 4);
        let shop = &tree.roots()[1];
        assert!(shop.has_children_marker());
        assert_eq!(shop.children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 4]);
        assert!(!tree.roots()[0].has_children_marker());
    }

    #[test]
    fn from_flat_orders_siblings_stably() {
        let tree = MenuTree::from_flat(vec![flat(1, 0, 5), flat(2, 0, 1), flat(3, 0, 5)]);
        let ids: Vec<_> = tree.roots().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn orphans_are_promoted() {
        let tree = MenuTree::from_flat(vec![flat(1, 0, 1), flat(2, 99, 2)]);
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.roots()[1].menu_item_parent, ROOT_PARENT);
    }

    #[test]
    fn cycles_are_dropped() {
        let tree = MenuTree::from_flat(vec![flat(1, 0, 1), flat(2, 3, 1), flat(3, 2, 1)]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn from_json_accepts_nested_form() {
        let json = r#"[
            {"id": 1, "title": "Home", "url": "/"},
            {"id": 2, "title": "Shop", "url": "/shop", "children": [
                {"id": 3, "title": "Shoes", "url": "/shoes"}
            ]}
        ]"#;
        let tree = MenuTree::from_json(json).unwrap();
        assert_eq!(tree.len(), 3);
        assert!(tree.roots()[1].has_children_marker());
        assert_eq!(tree.roots()[1].children[0].menu_item_parent, 2);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(MenuTree::from_json("{not json").is_err());
    }
}

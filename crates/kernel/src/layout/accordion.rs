//! Accordion open-state policies.
//!
//! Opening and closing happens client-side. The kernel only emits, for each
//! toggle and panel pair, the state expression matching the configured
//! policy, plus the initial state for active branches.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{MenuError, MenuResult};
use crate::menu::MenuNode;

/// Option key selecting the policy.
pub const ACCORDION_MODE_KEY: &str = "accordion_mode";

/// Which submenus may be open at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionPolicy {
    /// At most one open submenu per depth level.
    Classic,
    /// Every submenu keeps its own open flag.
    Independent,
    /// At most one open submenu in the whole tree.
    Exclusive,
}

impl AccordionPolicy {
    /// Parse the `accordion_mode` option value.
    pub fn parse(value: &str) -> MenuResult<Self> {
        match value {
            "classic" => Ok(Self::Classic),
            "independent" => Ok(Self::Independent),
            "exclusive" => Ok(Self::Exclusive),
            other => Err(MenuError::InvalidOption {
                key: ACCORDION_MODE_KEY.to_string(),
                reason: format!("expected classic, independent or exclusive, got `{other}`"),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Independent => "independent",
            Self::Exclusive => "exclusive",
        }
    }

    /// Expression that is true while the submenu of `node_id` is open.
    pub fn condition(self, node_id: u64, depth: usize) -> String {
        match self {
            Self::Classic => format!("openSubmenus[{depth}] === {node_id}"),
            Self::Independent => "open".to_string(),
            Self::Exclusive => format!("activeSubmenu === {node_id}"),
        }
    }

    /// Statement the toggle runs on click.
    pub fn toggle_action(self, node_id: u64, depth: usize) -> String {
        match self {
            Self::Classic => format!(
                "openSubmenus[{depth}] = openSubmenus[{depth}] === {node_id} ? null : {node_id}"
            ),
            Self::Independent => "open = !open".to_string(),
            Self::Exclusive => {
                format!("activeSubmenu = activeSubmenu === {node_id} ? null : {node_id}")
            }
        }
    }

    /// State fields declared once on the menu root, if the policy has any.
    pub fn root_state(self, open: &OpenState) -> Option<String> {
        match self {
            Self::Classic => {
                let slots: BTreeMap<String, u64> = open
                    .open_submenus
                    .iter()
                    .map(|(depth, id)| (depth.to_string(), *id))
                    .collect();
                let slots = serde_json::to_string(&slots).unwrap_or_else(|_| "{}".to_string());
                Some(format!("openSubmenus: {slots}"))
            }
            Self::Independent => None,
            Self::Exclusive => Some(match open.active_submenu {
                Some((_, id)) => format!("activeSubmenu: {id}"),
                None => "activeSubmenu: null".to_string(),
            }),
        }
    }

    /// State declared on the item owning the submenu, if the policy has any.
    pub fn item_state(self, node_id: u64, open: &OpenState) -> Option<String> {
        match self {
            Self::Independent => Some(format!(
                "{{ open: {} }}",
                open.expanded.contains(&node_id)
            )),
            Self::Classic | Self::Exclusive => None,
        }
    }

    /// Record `node` as initially open when it lies on the active branch.
    ///
    /// Items arrive in traversal order, so a panel's open state is final
    /// once its owner has been seeded.
    pub fn seed(self, open: &mut OpenState, node: &MenuNode) {
        if !node.has_children() || !node.is_active_branch() {
            return;
        }
        match self {
            Self::Classic => {
                open.open_submenus.entry(node.depth()).or_insert(node.id());
            }
            Self::Independent => {
                open.expanded.insert(node.id());
            }
            // The outermost active container; anything deeper would sit
            // inside a closed panel.
            Self::Exclusive => {
                if open.active_submenu.is_none() {
                    open.active_submenu = Some((node.depth(), node.id()));
                }
            }
        }
    }

    /// Evaluate [`condition`](Self::condition) against a simulated client state.
    pub fn is_open(self, state: &OpenState, node_id: u64, depth: usize) -> bool {
        match self {
            Self::Classic => state.open_submenus.get(&depth) == Some(&node_id),
            Self::Independent => state.expanded.contains(&node_id),
            Self::Exclusive => state.active_submenu.is_some_and(|(_, id)| id == node_id),
        }
    }
}

impl fmt::Display for AccordionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open-submenu bookkeeping for all three policies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenState {
    /// Classic: depth → open node id.
    open_submenus: BTreeMap<usize, u64>,
    /// Exclusive: (depth, node id) of the single open submenu.
    active_submenu: Option<(usize, u64)>,
    /// Independent: ids of open submenus.
    expanded: BTreeSet<u64>,
}

impl OpenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a toggle click the way the client-side expression would.
    pub fn toggle(&mut self, policy: AccordionPolicy, node_id: u64, depth: usize) {
        match policy {
            AccordionPolicy::Classic => {
                if self.open_submenus.get(&depth) == Some(&node_id) {
                    self.open_submenus.remove(&depth);
                } else {
                    self.open_submenus.insert(depth, node_id);
                }
            }
            AccordionPolicy::Independent => {
                if !self.expanded.remove(&node_id) {
                    self.expanded.insert(node_id);
                }
            }
            AccordionPolicy::Exclusive => {
                self.active_submenu = match self.active_submenu {
                    Some((_, id)) if id == node_id => None,
                    _ => Some((depth, node_id)),
                };
            }
        }
    }

    pub fn open_submenus(&self) -> &BTreeMap<usize, u64> {
        &self.open_submenus
    }

    pub fn active_submenu(&self) -> Option<u64> {
        self.active_submenu.map(|(_, id)| id)
    }

    pub fn is_expanded(&self, node_id: u64) -> bool {
        self.expanded.contains(&node_id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Identifier shared by a submenu container and the toggle controlling it.
pub fn submenu_id(prefix: &str, node_id: u64) -> String {
    format!("{prefix}-submenu-{node_id}")
}

/// Identifier of the toggle control for `node_id`.
pub fn toggle_id(prefix: &str, node_id: u64) -> String {
    format!("{prefix}-toggle-{node_id}")
}

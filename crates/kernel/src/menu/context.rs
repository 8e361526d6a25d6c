//! Per-render traversal state.
//!
//! A [`RenderContext`] is created for one render call and threaded through
//! every strategy callback. Strategies are stateless; everything a traversal
//! accumulates (ancestor chain, open submenus, buffered mega-menu children,
//! diagnostics) lives here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::FragmentCache;
use crate::content::FilterPipeline;
use crate::layout::OpenState;
use crate::security::{UrlPolicy, UrlSanitizer};

use super::item::RawMenuItem;
use super::node::MenuNode;
use super::options::RenderOptions;

/// Diagnostics collected during one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Items accepted and rendered (or buffered).
    pub items_processed: usize,
    /// Deepest accepted item.
    pub max_depth_reached: usize,
    /// Callbacks ignored because of the depth limit.
    pub skipped_depth: usize,
    /// Children dropped for lack of a parent container.
    pub dropped: usize,
    /// Items rejected because their depth skipped a level.
    pub rejected: usize,
    /// Fragments served from the fragment cache.
    pub cache_hits: usize,
}

/// A child held back until its parent's level closes.
#[derive(Debug, Clone)]
pub struct BufferedChild {
    pub node: Arc<MenuNode>,
    pub fragment: String,
}

/// State for exactly one traversal.
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    filters: &'a FilterPipeline,
    cache: Option<&'a dyn FragmentCache>,
    options_fingerprint: u64,
    urls: UrlSanitizer,
    current_node: Option<Arc<MenuNode>>,
    current_depth: usize,
    /// One slot per depth of the current ancestor chain; `Some` only for
    /// nodes that own children.
    parent_stack: Vec<Option<Arc<MenuNode>>>,
    /// Open levels as (depth, accepted).
    levels: Vec<(usize, bool)>,
    /// Open items, `None` for ignored ones.
    items: Vec<Option<Arc<MenuNode>>>,
    open: OpenState,
    buffers: HashMap<u64, Vec<BufferedChild>>,
    collecting: Option<u64>,
    stats: RenderStats,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        options: &'a RenderOptions,
        filters: &'a FilterPipeline,
        policy: UrlPolicy,
        cache: Option<&'a dyn FragmentCache>,
    ) -> Self {
        let options_fingerprint = {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            options.fingerprint_source().hash(&mut hasher);
            hasher.finish()
        };
        Self {
            options,
            filters,
            cache,
            options_fingerprint,
            urls: UrlSanitizer::new(policy),
            current_node: None,
            current_depth: 0,
            parent_stack: Vec::new(),
            levels: Vec::new(),
            items: Vec::new(),
            open: OpenState::new(),
            buffers: HashMap::new(),
            collecting: None,
            stats: RenderStats::default(),
        }
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn current_node(&self) -> Option<&Arc<MenuNode>> {
        self.current_node.as_ref()
    }

    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// The ancestor slot at `depth`, present only if that ancestor owns children.
    pub fn parent_at(&self, depth: usize) -> Option<&Arc<MenuNode>> {
        self.parent_stack.get(depth).and_then(Option::as_ref)
    }

    pub fn parent_stack(&self) -> &[Option<Arc<MenuNode>>] {
        &self.parent_stack
    }

    pub fn open_state(&self) -> &OpenState {
        &self.open
    }

    pub fn open_state_mut(&mut self) -> &mut OpenState {
        &mut self.open
    }

    /// Whether callbacks at `depth` fall inside the configured limit.
    pub fn within_limit(&self, depth: usize) -> bool {
        self.options.max_depth().is_none_or(|max| depth < max)
    }

    /// Whether `node`'s submenu container will be emitted. Toggles and
    /// `aria-controls` references must only exist when this holds.
    pub fn has_submenu(&self, node: &MenuNode) -> bool {
        node.has_children() && self.within_limit(node.depth() + 1)
    }

    /// Register a level opening. Returns whether the strategy should emit
    /// markup for it: the level must be inside the depth limit and directly
    /// below the most recently accepted item.
    pub fn enter_level(&mut self, depth: usize) -> bool {
        let accepted = if !self.within_limit(depth) {
            self.stats.skipped_depth += 1;
            false
        } else {
            depth > 0
                && self.parent_stack.len() == depth
                && self.levels.last().is_none_or(|(d, ok)| *ok && *d + 1 == depth)
        };
        self.levels.push((depth, accepted));
        accepted
    }

    /// Register a level closing; returns whether its opening was accepted.
    pub fn exit_level(&mut self, depth: usize) -> bool {
        match self.levels.last().copied() {
            Some((d, ok)) if d == depth => {
                self.levels.pop();
                ok
            }
            _ => {
                warn!(depth, "exit_level without matching enter_level");
                false
            }
        }
    }

    /// Build the node for `raw` if the item may be rendered at `depth`.
    ///
    /// Items beyond the depth limit are ignored; items whose depth does not
    /// follow from the open levels are rejected together with their subtree.
    pub fn begin_item(&mut self, raw: &RawMenuItem, depth: usize) -> Option<Arc<MenuNode>> {
        let node = self.accept_item(raw, depth);
        self.items.push(node.clone());
        node
    }

    fn accept_item(&mut self, raw: &RawMenuItem, depth: usize) -> Option<Arc<MenuNode>> {
        if !self.within_limit(depth) {
            self.stats.skipped_depth += 1;
            return None;
        }
        let expected = match self.levels.last() {
            None => depth == 0,
            Some((d, ok)) => *ok && *d == depth,
        };
        if !expected {
            self.stats.rejected += 1;
            warn!(
                id = raw.id,
                depth,
                open_levels = self.levels.len(),
                "menu item depth skips a level, rejecting"
            );
            return None;
        }

        let node = Arc::new(MenuNode::from_raw(
            raw,
            depth,
            self.options,
            self.filters,
            &mut self.urls,
        ));

        self.parent_stack.truncate(depth);
        self.parent_stack
            .push(node.has_children().then(|| Arc::clone(&node)));
        self.current_node = Some(Arc::clone(&node));
        self.current_depth = depth;
        self.stats.items_processed += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        Some(node)
    }

    /// Close the innermost item, returning its node if it was accepted.
    pub fn end_item(&mut self, _depth: usize) -> Option<Arc<MenuNode>> {
        self.items.pop().flatten()
    }

    /// Render `node` through the fragment cache, if one is configured.
    pub fn cached_fragment<F>(&mut self, node: &MenuNode, render: F) -> String
    where
        F: FnOnce(&MenuNode, &RenderContext<'a>) -> String,
    {
        let Some(cache) = self.cache else {
            return render(node, self);
        };
        let key = format!(
            "{}:{:x}:{}:{:x}",
            self.options.variant(),
            self.options_fingerprint,
            node.id(),
            node.fingerprint()
        );
        if let Some(hit) = cache.get(&key) {
            self.stats.cache_hits += 1;
            return hit;
        }
        let fragment = render(node, self);
        cache.insert(key, fragment.clone());
        fragment
    }

    /// Start buffering children for `parent_id`.
    pub fn start_collecting(&mut self, parent_id: u64) {
        self.buffers.entry(parent_id).or_default();
        self.collecting = Some(parent_id);
    }

    /// Parent currently collecting children, if any.
    pub fn collecting(&self) -> Option<u64> {
        self.collecting
    }

    /// Append a child to the collecting parent's buffer. A child with no
    /// collecting parent is dropped and counted.
    pub fn buffer_child(&mut self, node: Arc<MenuNode>, fragment: String) -> bool {
        let Some(parent) = self.collecting else {
            self.stats.dropped += 1;
            debug!(id = node.id(), "child without parent container dropped");
            return false;
        };
        self.buffers
            .entry(parent)
            .or_default()
            .push(BufferedChild { node, fragment });
        true
    }

    /// Fragment of the most recently buffered child.
    pub fn buffered_fragment_mut(&mut self) -> Option<&mut String> {
        let parent = self.collecting?;
        self.buffers
            .get_mut(&parent)
            .and_then(|children| children.last_mut())
            .map(|child| &mut child.fragment)
    }

    /// Buffered children of `parent_id`, in traversal order.
    pub fn buffered(&self, parent_id: u64) -> &[BufferedChild] {
        self.buffers
            .get(&parent_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Stop collecting and hand back the collecting parent's children.
    pub fn take_buffer(&mut self) -> Option<(u64, Vec<BufferedChild>)> {
        let parent = self.collecting.take()?;
        let children = self.buffers.remove(&parent).unwrap_or_default();
        Some((parent, children))
    }

    /// Clear all traversal state so the context can serve another render
    /// with the same options.
    pub fn reset(&mut self) {
        self.urls.clear();
        self.current_node = None;
        self.current_depth = 0;
        self.parent_stack.clear();
        self.levels.clear();
        self.items.clear();
        self.open.clear();
        self.buffers.clear();
        self.collecting = None;
        self.stats = RenderStats::default();
    }
}

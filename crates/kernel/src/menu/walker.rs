//! Reference traversal driver.

use tracing::trace;

use crate::strategy::MenuStrategy;

use super::context::RenderContext;
use super::item::RawMenuItem;

/// Walks a menu tree and drives a strategy's lifecycle callbacks.
pub trait TraversalDriver: Send + Sync {
    fn walk(
        &self,
        items: &[RawMenuItem],
        strategy: &dyn MenuStrategy,
        ctx: &mut RenderContext<'_>,
        out: &mut String,
    );
}

/// Depth-first driver matching the host's walker.
///
/// For each item in sibling order: `item_start(d)`; when the item has
/// children and `d + 1` is within the walker's own limit, `enter_level(d + 1)`,
/// the children, `exit_level(d + 1)`; then `item_end(d)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstWalker {
    /// Deepest depth the walker descends into; `None` walks everything.
    pub max_depth: Option<usize>,
}

impl DepthFirstWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    fn walk_level(
        &self,
        items: &[RawMenuItem],
        depth: usize,
        strategy: &dyn MenuStrategy,
        ctx: &mut RenderContext<'_>,
        out: &mut String,
    ) {
        for item in items {
            strategy.item_start(out, item, depth, ctx);
            let child_depth = depth + 1;
            if !item.children.is_empty() && self.max_depth.is_none_or(|max| child_depth < max) {
                strategy.enter_level(out, child_depth, ctx);
                self.walk_level(&item.children, child_depth, strategy, ctx, out);
                strategy.exit_level(out, child_depth, ctx);
            }
            strategy.item_end(out, item, depth, ctx);
        }
    }
}

impl TraversalDriver for DepthFirstWalker {
    fn walk(
        &self,
        items: &[RawMenuItem],
        strategy: &dyn MenuStrategy,
        ctx: &mut RenderContext<'_>,
        out: &mut String,
    ) {
        trace!(strategy = strategy.name(), roots = items.len(), "walking menu tree");
        self.walk_level(items, 0, strategy, ctx, out);
    }
}

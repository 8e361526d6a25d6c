//! Render facade: resolves a variant and drives one traversal.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::FragmentCache;
use crate::content::FilterPipeline;
use crate::error::MenuResult;
use crate::security::UrlPolicy;
use crate::strategy::MenuStrategy;

use super::context::{RenderContext, RenderStats};
use super::item::MenuTree;
use super::options::{OptionMap, RenderOptions, merged};
use super::registry::VariantRegistry;
use super::walker::{DepthFirstWalker, TraversalDriver};

/// Host navigation store: maps a menu location to the tree assigned to it.
pub trait MenuSource: Send + Sync {
    fn menu(&self, location: &str) -> Option<Arc<MenuTree>>;
}

/// In-memory [`MenuSource`].
#[derive(Debug, Default, Clone)]
pub struct StaticMenuSource {
    menus: HashMap<String, Arc<MenuTree>>,
}

impl StaticMenuSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `tree` to `location`, replacing any previous assignment.
    pub fn assign(&mut self, location: &str, tree: MenuTree) {
        self.menus.insert(location.to_string(), Arc::new(tree));
    }

    pub fn with(mut self, location: &str, tree: MenuTree) -> Self {
        self.assign(location, tree);
        self
    }
}

impl MenuSource for StaticMenuSource {
    fn menu(&self, location: &str) -> Option<Arc<MenuTree>> {
        self.menus.get(location).cloned()
    }
}

/// Tap run before options are resolved; may rewrite the caller's overrides.
pub type BeforeTap = Box<dyn Fn(&str, &mut OptionMap) + Send + Sync>;

/// Tap run on the finished markup.
pub type AfterTap = Box<dyn Fn(&str, String) -> String + Send + Sync>;

/// Ordered extension points around a render call.
///
/// `before` taps receive the variant key and the override map; `after` taps
/// receive the variant key and the markup and return the markup to pass on.
#[derive(Default)]
pub struct RenderTaps {
    before: Vec<BeforeTap>,
    after: Vec<AfterTap>,
}

impl RenderTaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before<F>(mut self, tap: F) -> Self
    where
        F: Fn(&str, &mut OptionMap) + Send + Sync + 'static,
    {
        self.before.push(Box::new(tap));
        self
    }

    pub fn after<F>(mut self, tap: F) -> Self
    where
        F: Fn(&str, String) -> String + Send + Sync + 'static,
    {
        self.after.push(Box::new(tap));
        self
    }

    fn run_before(&self, variant: &str, overrides: &mut OptionMap) {
        for tap in &self.before {
            tap(variant, overrides);
        }
    }

    fn run_after(&self, variant: &str, html: String) -> String {
        self.after.iter().fold(html, |html, tap| tap(variant, html))
    }
}

impl std::fmt::Debug for RenderTaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTaps")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

/// Markup and diagnostics of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub stats: RenderStats,
}

/// Composition root for menu rendering.
pub struct MenuRenderer {
    registry: VariantRegistry,
    source: Arc<dyn MenuSource>,
    driver: Arc<dyn TraversalDriver>,
    filters: FilterPipeline,
    cache: Option<Arc<dyn FragmentCache>>,
    url_policy: UrlPolicy,
    taps: RenderTaps,
}

impl MenuRenderer {
    /// Renderer over `registry` with an empty menu source, the depth-first
    /// walker, the standard filters, no fragment cache and the default URL
    /// policy.
    pub fn new(registry: VariantRegistry) -> Self {
        Self {
            registry,
            source: Arc::new(StaticMenuSource::new()),
            driver: Arc::new(DepthFirstWalker::new()),
            filters: FilterPipeline::standard(),
            cache: None,
            url_policy: UrlPolicy::default(),
            taps: RenderTaps::new(),
        }
    }

    pub fn with_source(mut self, source: Arc<dyn MenuSource>) -> Self {
        self.source = source;
        self
    }

    pub fn with_driver(mut self, driver: Arc<dyn TraversalDriver>) -> Self {
        self.driver = driver;
        self
    }

    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn FragmentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_url_policy(mut self, policy: UrlPolicy) -> Self {
        self.url_policy = policy;
        self
    }

    pub fn with_taps(mut self, taps: RenderTaps) -> Self {
        self.taps = taps;
        self
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Render the menu assigned to `location` with `variant`.
    ///
    /// `extra` is merged over `options`. Unknown variants and invalid options
    /// are errors; an unassigned location renders as an empty string.
    pub fn render(
        &self,
        variant: &str,
        location: &str,
        options: &OptionMap,
        extra: &OptionMap,
    ) -> MenuResult<String> {
        let (resolved, strategy) = self.resolve(variant, &merged(options, extra))?;
        let Some(tree) = self.source.menu(location) else {
            debug!(variant, location, "no menu assigned to location");
            return Ok(String::new());
        };
        Ok(self.render_resolved(&resolved, strategy.as_ref(), &tree).html)
    }

    /// Render `tree` directly, bypassing the menu source.
    pub fn render_tree(&self, variant: &str, tree: &MenuTree, options: &OptionMap) -> MenuResult<Rendered> {
        let (resolved, strategy) = self.resolve(variant, options)?;
        Ok(self.render_resolved(&resolved, strategy.as_ref(), tree))
    }

    fn resolve(
        &self,
        variant: &str,
        overrides: &OptionMap,
    ) -> MenuResult<(RenderOptions, Arc<dyn MenuStrategy>)> {
        let entry = self.registry.get(variant)?;
        let mut overrides = overrides.clone();
        self.taps.run_before(variant, &mut overrides);
        let options = RenderOptions::resolve(variant, &entry.defaults, &overrides)?;
        entry.strategy.validate(&options)?;
        Ok((options, Arc::clone(&entry.strategy)))
    }

    fn render_resolved(
        &self,
        options: &RenderOptions,
        strategy: &dyn MenuStrategy,
        tree: &MenuTree,
    ) -> Rendered {
        let variant = options.variant();

        let mut ctx = RenderContext::new(
            options,
            &self.filters,
            self.url_policy.clone(),
            self.cache.as_deref(),
        );
        let mut items = String::new();
        self.driver.walk(tree.roots(), strategy, &mut ctx, &mut items);
        let html = strategy.wrap(&items, &ctx);
        let stats = ctx.stats();

        debug!(
            variant,
            strategy = strategy.name(),
            items = stats.items_processed,
            max_depth = stats.max_depth_reached,
            skipped = stats.skipped_depth,
            dropped = stats.dropped,
            rejected = stats.rejected,
            cache_hits = stats.cache_hits,
            "menu rendered"
        );

        Rendered {
            html: self.taps.run_after(variant, html),
            stats,
        }
    }
}

impl std::fmt::Debug for MenuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuRenderer")
            .field("variants", &self.registry.len())
            .field("filters", &self.filters)
            .field("cache", &self.cache.is_some())
            .field("url_policy", &self.url_policy)
            .field("taps", &self.taps)
            .finish()
    }
}

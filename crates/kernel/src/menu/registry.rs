//! Variant registry: maps variant keys to a strategy and its default options.
//!
//! The registry is an explicit value built at startup and handed to the
//! renderer. [`VariantRegistry::builtin`] registers the eleven shipped
//! variants; hosts may add their own with [`VariantRegistry::register`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{MenuError, MenuResult};
use crate::strategy::{
    FullscreenOverlay, HorizontalDropdown, MegaMenu, MenuStrategy, MobileAccordion, SimpleList,
    VerticalDropdown, defaults,
};

use super::options::OptionMap;

/// One registered menu variant.
#[derive(Clone)]
pub struct Variant {
    /// Registry key, e.g. `mega`.
    pub key: String,
    /// Human-readable summary.
    pub description: String,
    pub strategy: Arc<dyn MenuStrategy>,
    /// The closed option set of this variant, with default values.
    pub defaults: OptionMap,
}

impl std::fmt::Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("key", &self.key)
            .field("strategy", &self.strategy.name())
            .field("options", &self.defaults.len())
            .finish()
    }
}

/// Registry of menu variants, ordered by key.
#[derive(Debug, Default, Clone)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Variant>,
}

impl VariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in variants.
    pub fn builtin() -> Self {
        let simple: Arc<dyn MenuStrategy> = Arc::new(SimpleList);
        let dropdown: Arc<dyn MenuStrategy> = Arc::new(VerticalDropdown);
        let desktop: Arc<dyn MenuStrategy> = Arc::new(HorizontalDropdown);
        let accordion: Arc<dyn MenuStrategy> = Arc::new(MobileAccordion);
        let mega: Arc<dyn MenuStrategy> = Arc::new(MegaMenu);
        let overlay: Arc<dyn MenuStrategy> = Arc::new(FullscreenOverlay::default());

        let builtins = [
            ("simple", "Plain nested list", &simple, defaults::simple()),
            ("footer", "Single-level footer links", &simple, defaults::footer()),
            ("dropdown", "Vertical menu with submenu toggles", &dropdown, defaults::dropdown()),
            ("sidebar", "Sidebar menu, current branch expanded", &dropdown, defaults::sidebar()),
            ("desktop", "Horizontal menubar, hover dropdowns", &desktop, defaults::desktop()),
            ("desktop-click", "Horizontal menubar, click dropdowns", &desktop, defaults::desktop_click()),
            ("mobile", "Mobile accordion, one open submenu per level", &accordion, defaults::mobile()),
            ("offcanvas", "Off-canvas accordion, independent submenus", &accordion, defaults::offcanvas()),
            ("mega", "Mega-menu panels with descriptions", &mega, defaults::mega()),
            ("multi-column", "Multi-column dropdown panels", &mega, defaults::multi_column()),
            ("overlay", "Full-screen overlay, one open submenu", &overlay, defaults::overlay()),
        ];

        let mut registry = Self::new();
        for (key, description, strategy, defaults) in builtins {
            registry.variants.insert(
                key.to_string(),
                Variant {
                    key: key.to_string(),
                    description: description.to_string(),
                    strategy: Arc::clone(strategy),
                    defaults,
                },
            );
        }
        debug!(variants = registry.len(), "registered built-in menu variants");
        registry
    }

    /// Register a variant. Keys are unique.
    pub fn register(&mut self, variant: Variant) -> MenuResult<()> {
        if self.variants.contains_key(&variant.key) {
            return Err(MenuError::DuplicateVariant(variant.key));
        }
        debug!(key = %variant.key, strategy = variant.strategy.name(), "registered menu variant");
        self.variants.insert(variant.key.clone(), variant);
        Ok(())
    }

    /// Look up a variant by key.
    pub fn get(&self, key: &str) -> MenuResult<&Variant> {
        self.variants
            .get(key)
            .ok_or_else(|| MenuError::UnknownVariant(key.to_string()))
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// All variants in key order.
    pub fn all(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

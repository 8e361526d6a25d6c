#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Trees are built with `menuwalk-test-utils` fixtures and parsed through the
//! same JSON path the host uses, so tests exercise real tree assembly.

#![allow(dead_code)]

use serde_json::Value;

use menuwalk_kernel::menu::options::OptionMap;
use menuwalk_kernel::menu::renderer::Rendered;
use menuwalk_kernel::menu::{MenuRenderer, MenuTree, VariantRegistry};
use menuwalk_test_utils::{TestItem, tree_json};

/// Parse fixture items into a tree.
pub fn tree(items: &[TestItem]) -> MenuTree {
    MenuTree::from_value(tree_json(items)).unwrap()
}

/// Option overrides from literal pairs.
pub fn opts(pairs: &[(&str, Value)]) -> OptionMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Renderer over the built-in variants with default collaborators.
pub fn renderer() -> MenuRenderer {
    MenuRenderer::new(VariantRegistry::builtin())
}

/// Render `items` with `variant`.
pub fn render(variant: &str, items: &[TestItem], pairs: &[(&str, Value)]) -> Rendered {
    renderer()
        .render_tree(variant, &tree(items), &opts(pairs))
        .unwrap()
}

#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Render facade tests: variant dispatch, option errors, taps, caching.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use common::{opts, renderer, tree};
use menuwalk_kernel::MenuError;
use menuwalk_kernel::cache::MokaFragmentCache;
use menuwalk_kernel::content::{FilterPipeline, FnFilter};
use menuwalk_kernel::menu::{MenuRenderer, RenderTaps, StaticMenuSource, VariantRegistry};
use menuwalk_test_utils::{assert, test_item, trees};

#[test]
fn test_unknown_variant_is_error() {
    let err = renderer()
        .render_tree("carousel", &tree(&trees::shop()), &opts(&[]))
        .unwrap_err();
    assert!(matches!(err, MenuError::UnknownVariant(ref key) if key == "carousel"));
    assert_eq!(err.to_string(), "unknown menu variant: carousel");
}

#[test]
fn test_unknown_option_is_error() {
    let err = renderer()
        .render_tree("simple", &tree(&trees::shop()), &opts(&[("columns", json!(3))]))
        .unwrap_err();
    assert!(matches!(err, MenuError::UnknownOption { ref key, .. } if key == "columns"));
}

#[test]
fn test_option_type_mismatch_is_error() {
    let err = renderer()
        .render_tree("mega", &tree(&trees::shop()), &opts(&[("columns", json!("three"))]))
        .unwrap_err();
    assert!(matches!(err, MenuError::OptionType { .. }));
}

#[test]
fn test_invalid_option_values_are_errors() {
    let r = renderer();
    let shop = tree(&trees::shop());
    for (variant, key, value) in [
        ("mobile", "accordion_mode", "sometimes"),
        ("desktop", "trigger", "focus"),
        ("simple", "container", "section"),
    ] {
        let err = r
            .render_tree(variant, &shop, &opts(&[(key, json!(value))]))
            .unwrap_err();
        assert!(matches!(err, MenuError::InvalidOption { .. }), "{variant}.{key}");
    }
}

#[test]
fn test_every_variant_accepts_own_keys() {
    let registry = VariantRegistry::builtin();
    let r = renderer();
    let shop = tree(&trees::shop());
    for variant in registry.all() {
        let out = r.render_tree(&variant.key, &shop, &variant.defaults).unwrap();
        assert!(out.html.contains("Shop"), "{}", variant.key);
    }
}

#[test]
fn test_render_by_location_merges_extra_options() {
    let source = StaticMenuSource::new().with("primary", tree(&trees::shop()));
    let r = MenuRenderer::new(VariantRegistry::builtin()).with_source(Arc::new(source));
    let html = r
        .render(
            "simple",
            "primary",
            &opts(&[("menu_class", json!("nav-a"))]),
            &opts(&[("menu_class", json!("nav-b")), ("menu_id", json!("main"))]),
        )
        .unwrap();
    assert::contains(&html, "<ul id=\"main\" class=\"nav-b\">");
}

#[test]
fn test_taps_run_in_order() {
    let taps = RenderTaps::new()
        .before(|variant, overrides| {
            if variant == "simple" {
                overrides.insert("container".into(), json!("div"));
            }
        })
        .after(|_, html| format!("<!-- a -->{html}"))
        .after(|variant, html| format!("<!-- {variant} -->{html}"));
    let r = renderer().with_taps(taps);
    let html = r
        .render_tree("simple", &tree(&trees::shop()), &opts(&[]))
        .unwrap()
        .html;
    assert!(html.starts_with("<!-- simple --><!-- a --><div><ul"));
}

#[test]
fn test_host_filters_apply_to_titles() {
    let filters = FilterPipeline::standard().add(FnFilter::new("shout", |s: &str| s.to_uppercase()));
    let r = renderer().with_filters(filters);
    let html = r
        .render_tree("simple", &tree(&[test_item(1, "  home   page ")]), &opts(&[]))
        .unwrap()
        .html;
    assert::contains(&html, "<span class=\"menu-text\">HOME PAGE</span>");
}

#[test]
fn test_fragment_cache_serves_repeat_renders() {
    let cache = Arc::new(MokaFragmentCache::default());
    let r = renderer().with_cache(cache.clone());
    let shop = tree(&trees::shop());

    let first = r.render_tree("dropdown", &shop, &opts(&[])).unwrap();
    assert_eq!(first.stats.cache_hits, 0);
    let second = r.render_tree("dropdown", &shop, &opts(&[])).unwrap();
    assert_eq!(second.stats.cache_hits, 4);
    assert_eq!(first.html, second.html);

    // Different options never reuse fragments.
    let third = r
        .render_tree("dropdown", &shop, &opts(&[("item_class", json!("entry"))]))
        .unwrap();
    assert_eq!(third.stats.cache_hits, 0);
    assert::contains(&third.html, "class=\"entry");
}

#[test]
fn test_skipped_level_is_rejected_not_fatal() {
    use menuwalk_kernel::menu::{RawMenuItem, RenderContext, RenderOptions};
    use menuwalk_kernel::security::UrlPolicy;
    use menuwalk_kernel::strategy::{MenuStrategy, SimpleList};
    use menuwalk_kernel::strategy::defaults;

    let options = RenderOptions::from_defaults("simple", &defaults::simple());
    let filters = FilterPipeline::new();
    let mut ctx = RenderContext::new(&options, &filters, UrlPolicy::default(), None);
    let mut out = String::new();
    let strategy = SimpleList;

    let home = RawMenuItem::new(1, "Home", "/");
    let deep = RawMenuItem::new(2, "Deep", "/deep");
    let next = RawMenuItem::new(3, "Next", "/next");
    strategy.item_start(&mut out, &home, 0, &mut ctx);
    strategy.item_end(&mut out, &home, 0, &mut ctx);
    strategy.item_start(&mut out, &deep, 2, &mut ctx);
    strategy.item_end(&mut out, &deep, 2, &mut ctx);
    strategy.item_start(&mut out, &next, 0, &mut ctx);
    strategy.item_end(&mut out, &next, 0, &mut ctx);

    assert::not_contains(&out, "Deep");
    assert::in_order(&out, &["Home", "</li>", "Next", "</li>"]);
    assert_eq!(out.matches("</li>").count(), 2);
    assert_eq!(ctx.stats().rejected, 1);
    assert_eq!(ctx.stats().items_processed, 2);
}

#[test]
fn test_renders_are_independent_across_threads() {
    let r = Arc::new(renderer());
    let shop = Arc::new(tree(&trees::deep_current()));
    let expected = r.render_tree("mobile", &shop, &opts(&[])).unwrap().html;
    let done = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let (r, shop, done) = (Arc::clone(&r), Arc::clone(&shop), Arc::clone(&done));
            std::thread::spawn(move || {
                let html = r.render_tree("mobile", &shop, &opts(&[])).unwrap().html;
                done.fetch_add(1, Ordering::SeqCst);
                html
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(done.load(Ordering::SeqCst), 4);
}

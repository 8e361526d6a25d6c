#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end rendering tests across the built-in variants.

mod common;

use serde_json::json;

use common::{render, tree};
use menuwalk_test_utils::{assert, count_occurrences, extract_attr, link_texts, test_item, trees};

#[test]
fn test_dropdown_two_level_tree() {
    let out = render("dropdown", &trees::shop(), &[("max_depth", json!(2))]);
    let html = out.html;

    assert_eq!(count_occurrences(&html, "<li "), 4);
    assert_eq!(link_texts(&html), vec!["Home", "Shop", "Shoes", "Hats"]);

    // Shop owns exactly one nested list holding Shoes then Hats.
    let nested_start = html.find("<ul id=\"dropdown-submenu-2\"").unwrap();
    let nested = &html[nested_start..];
    let nested = &nested[..nested.find("</ul>").unwrap()];
    assert_eq!(count_occurrences(nested, "<li "), 2);
    assert::in_order(nested, &["Shoes", "Hats"]);

    // Root list holds the two top-level items.
    assert::in_order(&html, &["<nav", "<ul class=\"menu menu--dropdown\">", "Home", "Shop"]);
    assert!(html.ends_with("</li></ul></li></ul></nav>"));
    assert_eq!(out.stats.items_processed, 4);
}

#[test]
fn test_dropdown_toggle_controls_submenu() {
    let html = render("dropdown", &trees::shop(), &[]).html;
    let controls = extract_attr(&html, "<button", "aria-controls").unwrap();
    let target = extract_attr(&html, "class=\"sub-menu", "id").unwrap();
    assert_eq!(controls, target);
    assert::contains(&html, "aria-expanded=\"false\"");
    assert::contains(&html, " hidden>");
}

#[test]
fn test_sidebar_expands_active_branch() {
    let html = render("sidebar", &trees::deep_current(), &[]).html;
    let docs_panel = extract_attr(&html, "id=\"sidebar-submenu-10\"", "class").unwrap();
    assert_eq!(docs_panel, "sub-menu dropdown-menu depth-1");
    assert::not_contains(&html, "id=\"sidebar-submenu-10\" class=\"sub-menu dropdown-menu depth-1\" hidden");
    assert::contains(&html, "id=\"sidebar-submenu-1\" class=\"sub-menu dropdown-menu depth-1\" hidden");
}

#[test]
fn test_sibling_order_preserved() {
    let items: Vec<_> = (1..=9).map(|i| test_item(i, &format!("Item {i}"))).collect();
    for variant in ["simple", "dropdown", "desktop", "mobile", "mega", "overlay"] {
        let html = render(variant, &items, &[]).html;
        let expected: Vec<String> = (1..=9).map(|i| format!("Item {i}")).collect();
        assert_eq!(link_texts(&html), expected, "{variant}");
    }
}

#[test]
fn test_depth_limit_emits_nothing_at_limit() {
    let out = render("simple", &trees::deep_current(), &[("max_depth", json!(2))]);
    assert::not_contains(&out.html, "Install");
    assert::not_contains(&out.html, "depth-2");
    assert::contains(&out.html, "Guides");
    assert_eq!(out.stats.max_depth_reached, 1);

    let out = render("mega", &trees::deep_current(), &[("max_depth", json!(1))]);
    assert::not_contains(&out.html, "Team");
    assert::not_contains(&out.html, "<div id=\"mega-panel");
    assert_eq!(out.stats.items_processed, 2);
}

/// Every `aria-controls` target that has no element with that id.
fn dangling_controls(html: &str) -> Vec<String> {
    html.match_indices("aria-controls=\"")
        .filter_map(|(at, m)| {
            let rest = &html[at + m.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .filter(|target| !html.contains(&format!(" id=\"{target}\"")))
        .collect()
}

#[test]
fn test_toggles_at_depth_limit_have_targets() {
    let items = vec![test_item(1, "Shop").with_children(vec![
        test_item(2, "Shoes").with_children(vec![test_item(3, "Boots")]),
    ])];
    let variants = [
        ("dropdown", 2),
        ("sidebar", 2),
        ("desktop", 2),
        ("desktop-click", 2),
        ("mobile", 2),
        ("offcanvas", 2),
        ("overlay", 2),
        ("mega", 2),
        ("mega", 1),
    ];
    for (variant, max_depth) in variants {
        let html = render(variant, &items, &[("max_depth", json!(max_depth))]).html;
        assert::not_contains(&html, "Boots");
        assert!(dangling_controls(&html).is_empty(), "{variant}@{max_depth}: {html}");
    }

    // Shoes sits on the last rendered level: a plain item with no toggle.
    let html = render("dropdown", &items, &[("max_depth", json!(2))]).html;
    assert_eq!(count_occurrences(&html, "<button"), 1);
    assert::not_contains(&html, "dropdown-submenu-2");
    let html = render("mobile", &items, &[("max_depth", json!(2))]).html;
    assert::not_contains(&html, "mobile-toggle-2");
    assert::contains(&html, "<li id=\"mobile-item-2\" class=\"menu-item menu-item-has-children\">");
    let html = render("mega", &items, &[("max_depth", json!(1))]).html;
    assert::not_contains(&html, "has-mega");
}

#[test]
fn test_footer_is_single_level() {
    let html = render("footer", &trees::shop(), &[]).html;
    assert_eq!(link_texts(&html), vec!["Home", "Shop"]);
    assert::contains(&html, "aria-label=\"Footer\"");
}

#[test]
fn test_flat_input_renders_like_nested() {
    let nested = render("simple", &trees::shop(), &[]).html;
    let flat = render("simple", &trees::shop_flat(), &[]).html;
    assert_eq!(nested, flat);
    assert_eq!(tree(&trees::shop_flat()).len(), 4);
}

#[test]
fn test_desktop_hover_and_click() {
    let hover = render("desktop", &trees::shop(), &[]).html;
    assert::contains(&hover, "role=\"menubar\" data-trigger=\"hover\"");
    assert::contains(&hover, "aria-haspopup=\"true\" aria-expanded=\"false\" aria-controls=\"desktop-submenu-2\"");
    assert::not_contains(&hover, "<button");
    assert::contains(&hover, "<ul id=\"desktop-submenu-2\" class=\"sub-menu dropdown depth-1\" role=\"menu\">");

    let click = render("desktop-click", &trees::deep_current(), &[("flyout_direction", json!("left"))]).html;
    assert::contains(&click, "data-trigger=\"click\"");
    assert_eq!(
        extract_attr(&click, "<button", "aria-controls").as_deref(),
        Some("desktop-submenu-1")
    );
    assert::contains(&click, "class=\"sub-menu flyout flyout-left depth-2\"");
}

#[test]
fn test_unsafe_host_data_is_neutralized() {
    let items = vec![
        test_item(1, "<script>alert(1)</script>Bad <b>title</b>").with_url("javascript:alert(1)"),
        test_item(2, "Ext")
            .with_url("https://example.com/?q=\"x\"")
            .with_target("_blank")
            .with_class("ok\"><img onerror=x>"),
        test_item(3, "Icon").with_attr_title("fa-home\" onmouseover=\"x"),
    ];
    let html = render("simple", &items, &[]).html;
    assert::not_contains(&html, "<script");
    assert::not_contains(&html, "javascript:");
    assert::not_contains(&html, "<img");
    assert::contains(&html, "<span class=\"menu-text\">Bad title</span>");
    assert::contains(&html, "href=\"#\"");
    assert::contains(&html, "rel=\"noopener noreferrer\"");
    assert::not_contains(&html, "<i class=");
    assert::not_contains(&html, "onmouseover");
}

#[test]
fn test_icons_from_tooltip_and_class() {
    let items = vec![
        test_item(1, "Home").with_attr_title("fa-home"),
        test_item(2, "Cart").with_class("fa-shopping-cart").with_class("cart"),
    ];
    let html = render("simple", &items, &[]).html;
    assert::contains(&html, "<i class=\"fa fa-home\" aria-hidden=\"true\"></i>");
    assert::contains(&html, "<i class=\"fa fa-shopping-cart\" aria-hidden=\"true\"></i>");
    assert::contains(&html, "class=\"menu-item cart\"");
    assert::not_contains(&html, "title=\"fa-home\"");
}

#[test]
fn test_unknown_location_renders_empty() {
    let html = common::renderer()
        .render("simple", "nowhere", &common::opts(&[]), &common::opts(&[]))
        .unwrap();
    assert!(html.is_empty());
}

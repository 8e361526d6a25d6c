//! Plain nested list.

use serde_json::json;

use crate::menu::options::{OptionMap, base_defaults, merged, option_map};
use crate::menu::{MenuNode, RawMenuItem, RenderContext};

use super::MenuStrategy;
use super::markup::{li_open, link, sub_list_open};

pub fn simple_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([("menu_class", json!("menu menu--simple"))]),
    )
}

pub fn footer_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--footer")),
            ("aria_label", json!("Footer")),
            ("max_depth", json!(1)),
            ("show_icons", json!(false)),
        ]),
    )
}

/// Nested `<ul>`/`<li>` markup with no interactive behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleList;

impl MenuStrategy for SimpleList {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if ctx.enter_level(depth) {
            out.push_str(&sub_list_open(ctx, depth, None, &[], ""));
        }
    }

    fn item_start(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        if let Some(node) = ctx.begin_item(item, depth) {
            let fragment = ctx.cached_fragment(&node, |n, c| self.render_node(n, c));
            out.push_str(&fragment);
        }
    }

    fn item_end(&self, out: &mut String, _item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        if ctx.end_item(depth).is_some() {
            out.push_str("</li>");
        }
    }

    fn exit_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if ctx.exit_level(depth) {
            out.push_str("</ul>");
        }
    }

    fn render_node(&self, node: &MenuNode, ctx: &RenderContext<'_>) -> String {
        format!("{}{}", li_open(node, ctx, &[], ""), link(node, ctx, ""))
    }
}

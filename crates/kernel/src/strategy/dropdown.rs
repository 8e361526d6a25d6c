//! Vertical list with disclosure toggles for nested levels.

use serde_json::json;

use crate::layout::submenu_id;
use crate::menu::options::{OptionMap, base_defaults, merged, option_map};
use crate::menu::{MenuNode, RawMenuItem, RenderContext};

use super::MenuStrategy;
use super::markup::{li_open, link, sub_list_open, toggle_button};

pub fn dropdown_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--dropdown")),
            ("id_prefix", json!("dropdown")),
            ("dropdown_class", json!("dropdown-menu")),
            ("toggle_class", json!("submenu-toggle")),
            ("toggle_label", json!("Toggle submenu")),
            ("expand_active", json!(false)),
        ]),
    )
}

pub fn sidebar_defaults() -> OptionMap {
    merged(
        &dropdown_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--sidebar")),
            ("aria_label", json!("Sidebar")),
            ("id_prefix", json!("sidebar")),
            ("expand_active", json!(true)),
        ]),
    )
}

/// Vertical menu whose submenus are hidden behind a toggle button.
///
/// The toggle's `aria-controls` and the submenu's `id` share
/// [`submenu_id`]. With `expand_active`, submenus on the current branch
/// start expanded.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalDropdown;

fn expanded(node: &MenuNode, ctx: &RenderContext<'_>) -> bool {
    ctx.options().bool("expand_active") && node.is_active_branch()
}

impl MenuStrategy for VerticalDropdown {
    fn name(&self) -> &'static str {
        "dropdown"
    }

    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if !ctx.enter_level(depth) {
            return;
        }
        let classes = vec![ctx.options().css_class("dropdown_class")];
        let markup = match ctx.parent_at(depth - 1) {
            Some(parent) => {
                let id = submenu_id(&ctx.options().id_prefix(), parent.id());
                let hidden = if expanded(parent, ctx) { "" } else { " hidden" };
                sub_list_open(ctx, depth, Some(&id), &classes, hidden)
            }
            None => sub_list_open(ctx, depth, None, &classes, ""),
        };
        out.push_str(&markup);
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
        if !ctx.has_submenu(node) {
            return format!("{}{}", li_open(node, ctx, &[], ""), link(node, ctx, ""));
        }
        let options = ctx.options();
        let open = expanded(node, ctx);
        let extra: &[&str] = if open { &["has-dropdown", "is-open"] } else { &["has-dropdown"] };
        let toggle = toggle_button(
            &submenu_id(&options.id_prefix(), node.id()),
            options.str("toggle_label"),
            &options.css_class("toggle_class"),
            &format!(" aria-expanded=\"{open}\""),
        );
        format!("{}{}{toggle}", li_open(node, ctx, extra, ""), link(node, ctx, ""))
    }
}

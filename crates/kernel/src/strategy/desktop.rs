//! Horizontal menubar with hover or click dropdowns and nested flyouts.

use serde_json::json;

use crate::error::MenuResult;
use crate::layout::submenu_id;
use crate::menu::options::{OptionMap, base_defaults, merged, option_map};
use crate::menu::{MenuNode, RawMenuItem, RenderContext, RenderOptions};
use crate::security::esc_attr;

use super::markup::{li_open, link, sub_list_open, toggle_button, wrap_list};
use super::{MenuStrategy, validate_choice, validate_common};

pub fn desktop_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--desktop")),
            ("aria_label", json!("Main")),
            ("id_prefix", json!("desktop")),
            ("trigger", json!("hover")),
            ("flyout_direction", json!("right")),
            ("dropdown_class", json!("dropdown")),
            ("flyout_class", json!("flyout")),
            ("toggle_class", json!("dropdown-toggle")),
            ("toggle_label", json!("Show submenu")),
        ]),
    )
}

pub fn desktop_click_defaults() -> OptionMap {
    merged(&desktop_defaults(), &option_map([("trigger", json!("click"))]))
}

/// Top-level items form a `menubar`; the first nested level opens as a
/// dropdown and deeper levels as flyouts to the configured side.
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizontalDropdown;

fn click_trigger(options: &RenderOptions) -> bool {
    options.str("trigger") == "click"
}

impl MenuStrategy for HorizontalDropdown {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn validate(&self, options: &RenderOptions) -> MenuResult<()> {
        validate_common(options)?;
        validate_choice(options, "trigger", &["hover", "click"])?;
        validate_choice(options, "flyout_direction", &["left", "right"])
    }

    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if !ctx.enter_level(depth) {
            return;
        }
        let options = ctx.options();
        let classes = if depth == 1 {
            vec![options.css_class("dropdown_class")]
        } else {
            vec![
                options.css_class("flyout_class"),
                format!("flyout-{}", options.css_class("flyout_direction")),
            ]
        };
        let id = ctx
            .parent_at(depth - 1)
            .map(|parent| submenu_id(&options.id_prefix(), parent.id()));
        out.push_str(&sub_list_open(ctx, depth, id.as_deref(), &classes, " role=\"menu\""));
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
        let options = ctx.options();
        if !ctx.has_submenu(node) {
            return format!(
                "{}{}",
                li_open(node, ctx, &[], " role=\"none\""),
                link(node, ctx, " role=\"menuitem\"")
            );
        }

        let controls = submenu_id(&options.id_prefix(), node.id());
        let li = li_open(node, ctx, &["has-dropdown"], " role=\"none\"");
        if click_trigger(options) {
            let toggle = toggle_button(
                &controls,
                options.str("toggle_label"),
                &options.css_class("toggle_class"),
                " aria-expanded=\"false\" aria-haspopup=\"true\"",
            );
            format!("{li}{}{toggle}", link(node, ctx, " role=\"menuitem\""))
        } else {
            let attrs = format!(
                " role=\"menuitem\" aria-haspopup=\"true\" aria-expanded=\"false\" aria-controls=\"{}\"",
                esc_attr(&controls)
            );
            format!("{li}{}", link(node, ctx, &attrs))
        }
    }

    fn wrap(&self, items: &str, ctx: &RenderContext<'_>) -> String {
        let trigger = if click_trigger(ctx.options()) { "click" } else { "hover" };
        wrap_list(
            items,
            ctx,
            &format!(" role=\"menubar\" data-trigger=\"{trigger}\""),
        )
    }
}

//! Full-screen overlay dialog holding an accordion menu.

use serde_json::json;

use crate::error::MenuResult;
use crate::layout::accordion::ACCORDION_MODE_KEY;
use crate::menu::options::{OptionMap, merged, option_map};
use crate::menu::{MenuNode, RawMenuItem, RenderContext, RenderOptions};
use crate::security::{esc_attr, esc_html};

use super::MenuStrategy;
use super::accordion::{MobileAccordion, mobile_defaults};
use super::markup::wrap_list;

pub fn overlay_defaults() -> OptionMap {
    merged(
        &mobile_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--overlay")),
            ("container", json!("div")),
            ("id_prefix", json!("overlay")),
            (ACCORDION_MODE_KEY, json!("exclusive")),
            ("overlay_class", json!("menu-overlay")),
            ("open_label", json!("Open menu")),
            ("close_label", json!("Close menu")),
        ]),
    )
}

/// Accordion menu rendered inside a modal dialog with open and close
/// buttons. Item and level markup is the accordion's.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullscreenOverlay {
    accordion: MobileAccordion,
}

impl MenuStrategy for FullscreenOverlay {
    fn name(&self) -> &'static str {
        "overlay"
    }

    fn validate(&self, options: &RenderOptions) -> MenuResult<()> {
        self.accordion.validate(options)
    }

    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        self.accordion.enter_level(out, depth, ctx);
    }

    fn item_start(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        self.accordion.item_start(out, item, depth, ctx);
    }

    fn item_end(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        self.accordion.item_end(out, item, depth, ctx);
    }

    fn exit_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        self.accordion.exit_level(out, depth, ctx);
    }

    fn render_node(&self, node: &MenuNode, ctx: &RenderContext<'_>) -> String {
        self.accordion.render_node(node, ctx)
    }

    fn wrap(&self, items: &str, ctx: &RenderContext<'_>) -> String {
        let options = ctx.options();
        let prefix = options.id_prefix();
        let class = options.css_class("overlay_class");
        let dialog_id = format!("{prefix}-dialog");

        let mut state = vec!["overlayOpen: false".to_string()];
        state.extend(self.accordion.root_state(ctx));
        let state = format!("{{ {} }}", state.join(", "));

        format!(
            concat!(
                "<div class=\"{class}\" x-data=\"{state}\">",
                "<button type=\"button\" class=\"{class}__open\" aria-controls=\"{dialog}\" ",
                ":aria-expanded=\"overlayOpen.toString()\" @click=\"overlayOpen = true\">{open}</button>",
                "<div id=\"{dialog}\" class=\"{class}__dialog\" role=\"dialog\" aria-modal=\"true\" ",
                "aria-label=\"{label}\" x-show=\"overlayOpen\" x-cloak @keydown.escape.window=\"overlayOpen = false\">",
                "<button type=\"button\" class=\"{class}__close\" @click=\"overlayOpen = false\">{close}</button>",
                "{list}</div></div>"
            ),
            class = class,
            state = esc_attr(&state),
            dialog = dialog_id,
            open = esc_html(options.str("open_label")),
            label = esc_attr(options.str("aria_label")),
            close = esc_html(options.str("close_label")),
            list = wrap_list(items, ctx, ""),
        )
    }
}

//! Mobile accordion with client-side open state.

use serde_json::json;

use crate::error::MenuResult;
use crate::layout::accordion::ACCORDION_MODE_KEY;
use crate::layout::{AccordionPolicy, submenu_id, toggle_id};
use crate::menu::options::{OptionMap, base_defaults, merged, option_map};
use crate::menu::{MenuNode, RawMenuItem, RenderContext, RenderOptions};
use crate::security::esc_attr;

use super::markup::{li_open, link, sub_list_open, toggle_button, wrap_list};
use super::{MenuStrategy, validate_common};

pub fn mobile_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--mobile")),
            ("aria_label", json!("Mobile menu")),
            ("id_prefix", json!("mobile")),
            (ACCORDION_MODE_KEY, json!("classic")),
            ("expand_active", json!(true)),
            ("panel_class", json!("accordion-panel")),
            ("toggle_class", json!("accordion-toggle")),
            ("toggle_label", json!("Toggle submenu")),
        ]),
    )
}

pub fn offcanvas_defaults() -> OptionMap {
    merged(
        &mobile_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--offcanvas")),
            ("id_prefix", json!("offcanvas")),
            (ACCORDION_MODE_KEY, json!("independent")),
        ]),
    )
}

/// Policy configured in `options`. Values are checked by `validate`, so a
/// bad name here only happens for unvalidated options and falls back to
/// classic.
pub(super) fn policy(options: &RenderOptions) -> AccordionPolicy {
    AccordionPolicy::parse(options.str(ACCORDION_MODE_KEY)).unwrap_or(AccordionPolicy::Classic)
}

/// Nested list whose submenus open in place under an accordion policy.
///
/// Every toggle and the panel it controls carry the same condition
/// expression and reference the same [`submenu_id`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MobileAccordion;

impl MobileAccordion {
    /// `x-data` declaring the policy's root state, if it has one.
    pub(super) fn root_state(&self, ctx: &RenderContext<'_>) -> Option<String> {
        policy(ctx.options()).root_state(ctx.open_state())
    }
}

impl MenuStrategy for MobileAccordion {
    fn name(&self) -> &'static str {
        "accordion"
    }

    fn validate(&self, options: &RenderOptions) -> MenuResult<()> {
        validate_common(options)?;
        AccordionPolicy::parse(options.str(ACCORDION_MODE_KEY)).map(|_| ())
    }

    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if !ctx.enter_level(depth) {
            return;
        }
        let options = ctx.options();
        let classes = vec![options.css_class("panel_class")];
        let Some(parent) = ctx.parent_at(depth - 1) else {
            out.push_str(&sub_list_open(ctx, depth, None, &classes, ""));
            return;
        };

        let policy = policy(options);
        let prefix = options.id_prefix();
        let open = policy.is_open(ctx.open_state(), parent.id(), parent.depth());
        let attrs = format!(
            " x-show=\"{}\" aria-labelledby=\"{}\"{}",
            esc_attr(&policy.condition(parent.id(), parent.depth())),
            toggle_id(&prefix, parent.id()),
            if open { "" } else { " x-cloak" }
        );
        let id = submenu_id(&prefix, parent.id());
        out.push_str(&sub_list_open(ctx, depth, Some(&id), &classes, &attrs));
    }

    fn item_start(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        let Some(node) = ctx.begin_item(item, depth) else {
            return;
        };
        if ctx.options().bool("expand_active") && ctx.has_submenu(&node) {
            policy(ctx.options()).seed(ctx.open_state_mut(), &node);
        }
        let fragment = ctx.cached_fragment(&node, |n, c| self.render_node(n, c));
        out.push_str(&fragment);
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
        let policy = policy(options);
        let prefix = options.id_prefix();

        let item_attrs = policy
            .item_state(node.id(), ctx.open_state())
            .map(|state| format!(" x-data=\"{}\"", esc_attr(&state)))
            .unwrap_or_default();
        let condition = policy.condition(node.id(), node.depth());
        let toggle_attrs = format!(
            " id=\"{}\" :aria-expanded=\"{}\" @click=\"{}\"",
            toggle_id(&prefix, node.id()),
            esc_attr(&format!("({condition}).toString()")),
            esc_attr(&policy.toggle_action(node.id(), node.depth())),
        );
        let toggle = toggle_button(
            &submenu_id(&prefix, node.id()),
            options.str("toggle_label"),
            &options.css_class("toggle_class"),
            &toggle_attrs,
        );
        format!(
            "{}{}{toggle}",
            li_open(node, ctx, &["has-accordion"], &item_attrs),
            link(node, ctx, "")
        )
    }

    fn wrap(&self, items: &str, ctx: &RenderContext<'_>) -> String {
        let attrs = self
            .root_state(ctx)
            .map(|state| format!(" x-data=\"{}\"", esc_attr(&format!("{{ {state} }}"))))
            .unwrap_or_default();
        wrap_list(items, ctx, &attrs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::FilterPipeline;
    use crate::menu::item::HAS_CHILDREN_CLASS;
    use crate::security::UrlPolicy;

    fn parent(id: u64) -> RawMenuItem {
        let mut raw = RawMenuItem::new(id, "Parent", "/p");
        raw.classes.push(HAS_CHILDREN_CLASS.into());
        raw
    }

    #[test]
    fn toggle_and_panel_share_identifier() {
        let opts = RenderOptions::from_defaults("mobile", &mobile_defaults());
        let filters = FilterPipeline::new();
        let mut ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        let strategy = MobileAccordion;
        let mut out = String::new();

        strategy.item_start(&mut out, &parent(1), 0, &mut ctx);
        strategy.enter_level(&mut out, 1, &mut ctx);
        strategy.item_start(&mut out, &parent(42), 1, &mut ctx);
        let toggle_end = out.len();
        strategy.enter_level(&mut out, 2, &mut ctx);

        let toggle = &out[..toggle_end];
        let panel = &out[toggle_end..];
        assert!(toggle.contains("aria-controls=\"mobile-submenu-42\""));
        assert!(panel.contains("id=\"mobile-submenu-42\""));
        assert!(toggle.contains("id=\"mobile-toggle-42\""));
        assert!(panel.contains("aria-labelledby=\"mobile-toggle-42\""));
        assert!(panel.contains("x-show=\"openSubmenus[1] === 42\""));
        assert!(toggle.contains(":aria-expanded=\"(openSubmenus[1] === 42).toString()\""));
    }

    #[test]
    fn independent_items_declare_own_state() {
        let opts = RenderOptions::from_defaults("offcanvas", &offcanvas_defaults());
        let filters = FilterPipeline::new();
        let mut ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        let mut raw = parent(5);
        raw.current_item_ancestor = true;
        let mut out = String::new();
        MobileAccordion.item_start(&mut out, &raw, 0, &mut ctx);
        assert!(out.contains("x-data=\"{ open: true }\""));
        assert!(out.contains("@click=\"open = !open\""));
        assert_eq!(MobileAccordion.root_state(&ctx), None);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let mut defaults = mobile_defaults();
        defaults.insert(ACCORDION_MODE_KEY.into(), json!("sometimes"));
        let opts = RenderOptions::from_defaults("mobile", &defaults);
        assert!(MobileAccordion.validate(&opts).is_err());
    }
}

//! Mega-menu: top-level items open panels with their children in columns.
//!
//! Depth-1 children are buffered under their parent and laid out once the
//! parent's level closes, so the column split can see every sibling.
//! Deeper descendants are appended to their depth-1 ancestor's fragment.

use serde_json::json;

use crate::layout::{ColumnPlan, clamp_columns};
use crate::menu::options::{OptionMap, base_defaults, merged, option_map};
use crate::menu::{BufferedChild, MenuNode, RawMenuItem, RenderContext};
use crate::security::esc_attr;

use super::MenuStrategy;
use super::markup::{class_attr, li_open, link, sub_list_open};

/// Class prefix a parent can carry to override its column count.
const COLUMNS_CLASS_PREFIX: &str = "columns-";

pub fn mega_defaults() -> OptionMap {
    merged(
        &base_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--mega")),
            ("aria_label", json!("Main")),
            ("id_prefix", json!("mega")),
            ("columns", json!(3)),
            ("max_columns", json!(6)),
            ("balance_columns", json!(true)),
            ("min_items_per_column", json!(4)),
            ("show_descriptions", json!(true)),
            ("show_panel_intro", json!(true)),
            ("panel_class", json!("mega-panel")),
            ("column_class", json!("mega-column")),
        ]),
    )
}

pub fn multi_column_defaults() -> OptionMap {
    merged(
        &mega_defaults(),
        &option_map([
            ("menu_class", json!("menu menu--columns")),
            ("id_prefix", json!("columns")),
            ("columns", json!(4)),
            ("show_descriptions", json!(false)),
            ("show_panel_intro", json!(false)),
        ]),
    )
}

/// Panel id for the children of `node_id`.
pub fn panel_id(prefix: &str, node_id: u64) -> String {
    format!("{prefix}-panel-{node_id}")
}

/// Column count for `parent`: a `columns-N` class wins over the option.
fn column_count(parent: Option<&MenuNode>, ctx: &RenderContext<'_>) -> usize {
    let options = ctx.options();
    let requested = parent
        .and_then(|p| {
            p.classes()
                .iter()
                .find_map(|c| c.strip_prefix(COLUMNS_CLASS_PREFIX)?.parse::<usize>().ok())
        })
        .unwrap_or_else(|| options.count("columns"));
    clamp_columns(requested, options.count("max_columns"))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MegaMenu;

impl MegaMenu {
    fn panel(&self, parent_id: u64, children: Vec<BufferedChild>, ctx: &RenderContext<'_>) -> String {
        let options = ctx.options();
        let parent = ctx.parent_at(0).filter(|p| p.id() == parent_id);
        let columns = column_count(parent.map(|p| &**p), ctx);
        let plan = ColumnPlan::new(
            children.len(),
            columns,
            options.bool("balance_columns"),
            options.count("min_items_per_column"),
        );

        let mut html = format!(
            "<div id=\"{}\"{}>",
            esc_attr(&panel_id(&options.id_prefix(), parent_id)),
            class_attr(&[options.css_class("panel_class"), format!("columns-{columns}")])
        );
        if options.bool("show_panel_intro")
            && let Some(description) = parent.and_then(|p| p.description())
        {
            html.push_str(&format!("<div class=\"mega-panel__intro\">{description}</div>"));
        }
        let column_class = class_attr(&[options.css_class("column_class")]);
        for column in plan.apply(children) {
            html.push_str(&format!("<ul{column_class}>"));
            for child in column {
                html.push_str(&child.fragment);
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>");
        html
    }
}

impl MenuStrategy for MegaMenu {
    fn name(&self) -> &'static str {
        "mega"
    }

    fn enter_level(&self, _out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if !ctx.enter_level(depth) {
            return;
        }
        if depth == 1 {
            if let Some(parent) = ctx.parent_at(0).map(|p| p.id()) {
                ctx.start_collecting(parent);
            }
            return;
        }
        let open = sub_list_open(ctx, depth, None, &[], "");
        if let Some(fragment) = ctx.buffered_fragment_mut() {
            fragment.push_str(&open);
        }
    }

    fn item_start(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        let Some(node) = ctx.begin_item(item, depth) else {
            return;
        };
        let fragment = ctx.cached_fragment(&node, |n, c| self.render_node(n, c));
        match depth {
            0 => out.push_str(&fragment),
            1 => {
                ctx.buffer_child(node, fragment);
            }
            _ => {
                if let Some(buffered) = ctx.buffered_fragment_mut() {
                    buffered.push_str(&fragment);
                }
            }
        }
    }

    fn item_end(&self, out: &mut String, _item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>) {
        if ctx.end_item(depth).is_none() {
            return;
        }
        if depth == 0 {
            out.push_str("</li>");
        } else if let Some(buffered) = ctx.buffered_fragment_mut() {
            buffered.push_str("</li>");
        }
    }

    fn exit_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>) {
        if !ctx.exit_level(depth) {
            return;
        }
        if depth == 1 {
            if let Some((parent_id, children)) = ctx.take_buffer() {
                out.push_str(&self.panel(parent_id, children, ctx));
            }
        } else if let Some(buffered) = ctx.buffered_fragment_mut() {
            buffered.push_str("</ul>");
        }
    }

    fn render_node(&self, node: &MenuNode, ctx: &RenderContext<'_>) -> String {
        if node.depth() == 0 && ctx.has_submenu(node) {
            let attrs = format!(
                " aria-haspopup=\"true\" aria-expanded=\"false\" aria-controls=\"{}\"",
                esc_attr(&panel_id(&ctx.options().id_prefix(), node.id()))
            );
            return format!("{}{}", li_open(node, ctx, &["has-mega"], ""), link(node, ctx, &attrs));
        }
        format!("{}{}", li_open(node, ctx, &[], ""), link(node, ctx, ""))
    }
}

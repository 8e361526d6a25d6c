//! Markup building blocks shared by the strategies.
//!
//! Node fields arrive already sanitized and escaped (see [`MenuNode`]);
//! option strings are escaped here.

use crate::menu::{MenuNode, RenderContext};
use crate::security::{esc_attr, esc_html, sanitize_css_classes};

/// ` class="..."`, or nothing for an empty list.
pub fn class_attr<S: AsRef<str>>(classes: &[S]) -> String {
    let joined = classes
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        String::new()
    } else {
        format!(" class=\"{joined}\"")
    }
}

/// Classes for an item's `<li>`: host classes, the configured item class,
/// the active class, then `extra`.
pub fn item_classes(node: &MenuNode, ctx: &RenderContext<'_>, extra: &[&str]) -> Vec<String> {
    let options = ctx.options();
    let max = options.count("max_class_length").max(1);
    let mut classes: Vec<String> = vec![options.css_class("item_class")];
    classes.extend(node.classes().iter().cloned());
    if node.is_active() {
        classes.push(options.css_class("active_class"));
    }
    classes.extend(extra.iter().map(|c| (*c).to_string()));
    sanitize_css_classes(&classes, max)
}

/// Element id of an item's `<li>`.
pub fn item_id(ctx: &RenderContext<'_>, node: &MenuNode) -> String {
    format!("{}-item-{}", ctx.options().id_prefix(), node.id())
}

/// Opening `<li>` for `node`.
pub fn li_open(node: &MenuNode, ctx: &RenderContext<'_>, extra_classes: &[&str], extra_attrs: &str) -> String {
    format!(
        "<li id=\"{}\"{}{}>",
        item_id(ctx, node),
        class_attr(&item_classes(node, ctx, extra_classes)),
        extra_attrs
    )
}

/// The item's anchor with icon, label and optional description.
pub fn link(node: &MenuNode, ctx: &RenderContext<'_>, extra_attrs: &str) -> String {
    let options = ctx.options();
    let mut attrs = format!(" href=\"{}\"", node.url());
    attrs.push_str(&class_attr(&[options.css_class("link_class")]));
    if let Some(target) = node.target() {
        attrs.push_str(&format!(" target=\"{target}\""));
    }
    if let Some(rel) = node.rel() {
        attrs.push_str(&format!(" rel=\"{rel}\""));
    }
    if let Some(tooltip) = node.tooltip() {
        attrs.push_str(&format!(" title=\"{tooltip}\""));
    }
    if node.is_current() {
        attrs.push_str(" aria-current=\"page\"");
    }
    attrs.push_str(extra_attrs);

    let icon = match node.icon() {
        Some(icon) if options.bool("show_icons") => {
            format!("<i class=\"{icon}\" aria-hidden=\"true\"></i>")
        }
        _ => String::new(),
    };
    let description = match node.description() {
        Some(desc) if options.bool("show_descriptions") => {
            format!("<span class=\"menu-description\">{desc}</span>")
        }
        _ => String::new(),
    };

    format!(
        "<a{attrs}>{icon}<span class=\"menu-text\">{}</span>{description}</a>",
        node.title()
    )
}

/// Opening `<ul>` for a nested level.
pub fn sub_list_open(
    ctx: &RenderContext<'_>,
    depth: usize,
    id: Option<&str>,
    extra_classes: &[String],
    extra_attrs: &str,
) -> String {
    let options = ctx.options();
    let mut classes = vec![options.css_class("submenu_class")];
    classes.extend(extra_classes.iter().cloned());
    classes.push(format!("depth-{depth}"));
    let id_attr = id
        .map(|id| format!(" id=\"{}\"", esc_attr(id)))
        .unwrap_or_default();
    format!("<ul{id_attr}{}{extra_attrs}>", class_attr(&classes))
}

/// A toggle button controlling the element `controls`.
pub fn toggle_button(controls: &str, label: &str, class: &str, extra_attrs: &str) -> String {
    format!(
        "<button type=\"button\" class=\"{}\" aria-controls=\"{}\"{extra_attrs}><span class=\"screen-reader-text\">{}</span></button>",
        esc_attr(class),
        esc_attr(controls),
        esc_html(label)
    )
}

/// Root `<ul>` around the traversal output, inside the configured container.
pub fn wrap_list(items: &str, ctx: &RenderContext<'_>, list_attrs: &str) -> String {
    let options = ctx.options();
    let menu_id = options.css_class("menu_id").replace(' ', "-");
    let id_attr = if menu_id.is_empty() {
        String::new()
    } else {
        format!(" id=\"{menu_id}\"")
    };
    let list = format!(
        "<ul{id_attr}{}{list_attrs}>{items}</ul>",
        class_attr(&[options.css_class("menu_class")])
    );

    let container_class = class_attr(&[options.css_class("container_class")]);
    match options.str("container") {
        "nav" => format!(
            "<nav{container_class} aria-label=\"{}\">{list}</nav>",
            esc_attr(options.str("aria_label"))
        ),
        "div" => format!("<div{container_class}>{list}</div>"),
        _ => list,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::FilterPipeline;
    use crate::menu::options::{OptionMap, base_defaults};
    use crate::menu::{RawMenuItem, RenderOptions};
    use crate::security::UrlPolicy;
    use serde_json::json;

    fn options(pairs: &[(&str, serde_json::Value)]) -> RenderOptions {
        let overrides: OptionMap = pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect();
        RenderOptions::resolve("simple", &base_defaults(), &overrides).unwrap()
    }

    #[test]
    fn class_attr_skips_empty() {
        assert_eq!(class_attr::<&str>(&[]), "");
        assert_eq!(class_attr(&["", "a", "b"]), " class=\"a b\"");
    }

    #[test]
    fn link_carries_icon_and_current_marker() {
        let opts = options(&[]);
        let filters = FilterPipeline::new();
        let mut ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        let mut raw = RawMenuItem::new(3, "Home", "/");
        raw.attr_title = "fa-home".into();
        raw.current = true;
        let node = ctx.begin_item(&raw, 0).unwrap();
        let html = link(&node, &ctx, "");
        assert_eq!(
            html,
            "<a href=\"/\" class=\"menu-link\" aria-current=\"page\"><i class=\"fa fa-home\" aria-hidden=\"true\"></i><span class=\"menu-text\">Home</span></a>"
        );
        let li = li_open(&node, &ctx, &["extra"], "");
        assert_eq!(li, "<li id=\"menu-item-3\" class=\"menu-item is-active extra\">");
    }

    #[test]
    fn icons_can_be_disabled() {
        let opts = options(&[("show_icons", json!(false))]);
        let filters = FilterPipeline::new();
        let mut ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        let mut raw = RawMenuItem::new(3, "Home", "/");
        raw.attr_title = "fa-home".into();
        let node = ctx.begin_item(&raw, 0).unwrap();
        assert!(!link(&node, &ctx, "").contains("<i "));
    }

    #[test]
    fn wrap_list_uses_container() {
        let filters = FilterPipeline::new();
        let opts = options(&[("menu_id", json!("primary")), ("aria_label", json!("Main \"nav\""))]);
        let ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        assert_eq!(
            wrap_list("<li></li>", &ctx, ""),
            "<nav aria-label=\"Main &quot;nav&quot;\"><ul id=\"primary\" class=\"menu\"><li></li></ul></nav>"
        );

        let opts = options(&[("container", json!(""))]);
        let ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        assert_eq!(wrap_list("", &ctx, " role=\"menubar\""), "<ul class=\"menu\" role=\"menubar\"></ul>");
    }

    #[test]
    fn sub_list_has_depth_class() {
        let filters = FilterPipeline::new();
        let opts = options(&[]);
        let ctx = RenderContext::new(&opts, &filters, UrlPolicy::default(), None);
        assert_eq!(
            sub_list_open(&ctx, 2, Some("x-submenu-4"), &["dropdown".to_string()], ""),
            "<ul id=\"x-submenu-4\" class=\"sub-menu dropdown depth-2\">"
        );
    }
}

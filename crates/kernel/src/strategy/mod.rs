//! Menu rendering strategies.
//!
//! The host's traversal driver invokes the four lifecycle callbacks of a
//! [`MenuStrategy`] in depth-first order:
//!
//! - `item_start(d)` for every item, in sibling order
//! - `enter_level(d + 1)` before the first child of an item with children
//! - `exit_level(d + 1)` after the last child, including its descendants
//! - `item_end(d)` once the item and its descendants are done
//!
//! Level callbacks report the depth of the items the level contains.
//! Strategies hold no traversal state of their own; all of it lives in the
//! [`RenderContext`] passed to each callback.

mod accordion;
mod desktop;
mod dropdown;
pub mod markup;
mod mega;
mod overlay;
mod simple;

pub use accordion::MobileAccordion;
pub use desktop::HorizontalDropdown;
pub use dropdown::VerticalDropdown;
pub use mega::MegaMenu;
pub use overlay::FullscreenOverlay;
pub use simple::SimpleList;

/// Default option sets for the built-in variants.
pub mod defaults {
    pub use super::accordion::{mobile_defaults as mobile, offcanvas_defaults as offcanvas};
    pub use super::desktop::{
        desktop_click_defaults as desktop_click, desktop_defaults as desktop,
    };
    pub use super::dropdown::{dropdown_defaults as dropdown, sidebar_defaults as sidebar};
    pub use super::mega::{mega_defaults as mega, multi_column_defaults as multi_column};
    pub use super::overlay::overlay_defaults as overlay;
    pub use super::simple::{footer_defaults as footer, simple_defaults as simple};
}

use crate::error::{MenuError, MenuResult};
use crate::menu::{MenuNode, RawMenuItem, RenderContext, RenderOptions};

/// Visitor turning a depth-first traversal into markup.
pub trait MenuStrategy: Send + Sync {
    /// Short strategy name for logs.
    fn name(&self) -> &'static str;

    /// Check option values beyond key and type validation.
    fn validate(&self, options: &RenderOptions) -> MenuResult<()> {
        validate_common(options)
    }

    /// A level of children begins.
    fn enter_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>);

    /// An item begins.
    fn item_start(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>);

    /// An item ends.
    fn item_end(&self, out: &mut String, item: &RawMenuItem, depth: usize, ctx: &mut RenderContext<'_>);

    /// A level of children ends.
    fn exit_level(&self, out: &mut String, depth: usize, ctx: &mut RenderContext<'_>);

    /// Markup for one node's own content (link, icon, toggle).
    fn render_node(&self, node: &MenuNode, ctx: &RenderContext<'_>) -> String;

    /// Wrap the traversal output in the root container.
    fn wrap(&self, items: &str, ctx: &RenderContext<'_>) -> String {
        markup::wrap_list(items, ctx, "")
    }
}

/// Checks shared by every strategy.
pub fn validate_common(options: &RenderOptions) -> MenuResult<()> {
    let container = options.str("container");
    if !matches!(container, "" | "nav" | "div") {
        return Err(MenuError::InvalidOption {
            key: "container".to_string(),
            reason: format!("expected nav, div or empty, got `{container}`"),
        });
    }
    Ok(())
}

/// Check that a string option is one of `allowed`.
pub(crate) fn validate_choice(options: &RenderOptions, key: &str, allowed: &[&str]) -> MenuResult<()> {
    let value = options.str(key);
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(MenuError::InvalidOption {
            key: key.to_string(),
            reason: format!("expected one of {}, got `{value}`", allowed.join(", ")),
        })
    }
}

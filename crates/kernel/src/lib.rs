//! menuwalk kernel library
//!
//! Navigation menu rendering: host menu data is walked depth-first and a
//! variant strategy turns the traversal into markup. The `menuwalk` binary
//! is a thin command-line front end over [`menu::MenuRenderer`].

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod menu;
pub mod security;
pub mod strategy;

pub use error::{MenuError, MenuResult};
pub use menu::{MenuRenderer, MenuTree, RawMenuItem, VariantRegistry};

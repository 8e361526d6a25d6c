//! Menu data, traversal and rendering.
//!
//! - [`item`]: raw host records and tree assembly
//! - [`node`]: sanitized per-item view
//! - [`options`]: per-variant option resolution
//! - [`context`]: per-render traversal state
//! - [`walker`]: the reference depth-first traversal driver
//! - [`registry`] and [`renderer`]: variant lookup and the render facade

pub mod context;
pub mod icon;
pub mod item;
pub mod node;
pub mod options;
pub mod registry;
pub mod renderer;
pub mod walker;

pub use context::{BufferedChild, RenderContext, RenderStats};
pub use item::{MenuTree, RawMenuItem};
pub use node::MenuNode;
pub use options::{OptionMap, RenderOptions};
pub use registry::{Variant, VariantRegistry};
pub use renderer::{MenuRenderer, MenuSource, RenderTaps, StaticMenuSource};
pub use walker::{DepthFirstWalker, TraversalDriver};

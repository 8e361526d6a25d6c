//! Host content filters applied to menu text before sanitization.

mod filter;

pub use filter::{CollapseWhitespaceFilter, FilterPipeline, FnFilter, TextFilter, TrimFilter};

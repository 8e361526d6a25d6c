//! Layout algorithms shared by the menu strategies.

pub mod accordion;
pub mod columns;

pub use accordion::{AccordionPolicy, OpenState, submenu_id, toggle_id};
pub use columns::{ColumnPlan, clamp_columns, distribute, items_per_column};

mod component;
pub mod input_box;
pub mod popup;
pub mod usage;

pub use component::{Component, ComponentRender};

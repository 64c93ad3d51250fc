mod components;
mod pages;
mod palette;
mod ui_manager;

pub use ui_manager::UiManager;

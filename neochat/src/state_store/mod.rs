pub mod action;
mod state;
#[allow(clippy::module_inception)]
mod state_store;

pub use self::state::{MessageView, State};
pub use self::state_store::StateStore;

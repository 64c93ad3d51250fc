/// Room, message and summary types shared by the store and its consumers
pub mod model;
/// Key-value storage backends mirroring the browser local storage contract
pub mod storage;
/// The room store, an ordered room mapping written through to storage on every mutation
pub mod store;
/// Display name and theme preferences persisted independently of the rooms
pub mod preferences;
/// Debounce used for the typing indicator
pub mod typing;
/// Lobby / Room session handling on top of the store
pub mod controller;

mod error;

pub use error::{StorageError, StoreError};

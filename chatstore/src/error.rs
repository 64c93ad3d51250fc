use thiserror::Error;

/// Failure of the key-value backend itself
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read storage key '{key}'")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write storage key '{key}'")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by store and controller operations.
/// Validation variants render as the prompt shown to the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Please enter a room name")]
    EmptyRoomName,
    #[error("Room name already exists!")]
    DuplicateRoom(String),
    #[error("Room \"{0}\" does not exist")]
    RoomNotFound(String),
    #[error("Please enter a message")]
    EmptyMessage,
    #[error("Please enter your name first")]
    EmptySender,
    #[error("Join a room before sending messages")]
    NoActiveRoom,
    #[error("could not serialize rooms")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Whether the error is a rejected user input rather than a storage failure
    pub fn is_validation(&self) -> bool {
        !matches!(self, StoreError::Serialize(_) | StoreError::Storage(_))
    }
}

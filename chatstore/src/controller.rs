use std::time::{Duration, Instant};

use crate::{
    model::{Message, RoomSummary},
    preferences::{self, Theme},
    storage::Storage,
    store::RoomStore,
    typing::TypingDebounce,
    StoreError,
};

/// Fallback name for the typing indicator when no display name is known
const ANONYMOUS_TYPIST: &str = "Someone";

/// The screen the user is looking at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Room(String),
}

/// ChatController owns the room store and the session fields of a single user:
/// the open room, the remembered display name, the theme, the typing flag and
/// a deletion awaiting confirmation.
#[derive(Debug)]
pub struct ChatController<S> {
    store: RoomStore<S>,
    /// Room currently open, `None` while in the lobby
    active_room: Option<String>,
    /// Last display name a message was sent with
    username: String,
    theme: Theme,
    typing: TypingDebounce,
    /// Room the user asked to delete, waiting for a yes / no
    pending_deletion: Option<String>,
}

impl<S: Storage> ChatController<S> {
    /// Builds the controller from whatever is persisted in `storage`
    pub fn load(storage: S, typing_idle: Duration) -> Self {
        let username = preferences::load_username(&storage);
        let theme = Theme::load(&storage);

        ChatController {
            store: RoomStore::load(storage),
            active_room: None,
            username,
            theme,
            typing: TypingDebounce::new(typing_idle),
            pending_deletion: None,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.active_room.as_ref() {
            Some(room) => Screen::Room(room.clone()),
            None => Screen::Lobby,
        }
    }

    pub fn active_room(&self) -> Option<&str> {
        self.active_room.as_deref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &RoomStore<S> {
        &self.store
    }

    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.store.list_rooms()
    }

    /// Messages of the open room in chronological order
    pub fn active_messages(&self) -> &[Message] {
        self.active_room
            .as_deref()
            .and_then(|room| self.store.room(room))
            .map(|room| room.messages.as_slice())
            .unwrap_or_default()
    }

    /// Whether `message` was written under the current display name
    pub fn is_sent(&self, message: &Message) -> bool {
        !self.username.is_empty() && message.sender() == self.username
    }

    pub fn create_room(&mut self, name: &str) -> Result<(), StoreError> {
        self.store.create_room(name)
    }

    /// Lobby -> Room
    pub fn join_room(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.store.contains(name) {
            return Err(StoreError::RoomNotFound(name.to_string()));
        }

        self.typing.clear();
        self.active_room = Some(name.to_string());
        tracing::debug!(room = name, "joined room");

        Ok(())
    }

    /// Room -> Lobby, nothing is persisted
    pub fn leave_room(&mut self) {
        if let Some(room) = self.active_room.take() {
            tracing::debug!(room = room.as_str(), "left room");
        }
        self.typing.clear();
    }

    /// Sends `text` to the open room under `sender`, remembering the display name
    pub fn send_message(&mut self, sender: &str, text: &str) -> Result<Message, StoreError> {
        let room = self.active_room.clone().ok_or(StoreError::NoActiveRoom)?;

        let message = self.store.append_message(&room, sender, text)?;
        self.typing.clear();

        if message.sender() != self.username {
            self.username = message.sender().to_string();
            preferences::save_username(self.store.storage_mut(), &self.username)?;
        }

        Ok(message)
    }

    /// Marks the user as typing and restarts the idle countdown
    pub fn typing(&mut self, now: Instant) {
        self.typing.touch(now);
    }

    /// Clears the typing flag once idle long enough. Returns true when it was cleared.
    pub fn expire_typing(&mut self, now: Instant) -> bool {
        self.typing.expire(now)
    }

    pub fn typing_deadline(&self) -> Option<Instant> {
        self.typing.deadline()
    }

    pub fn typing_indicator(&self) -> Option<String> {
        if !self.typing.is_typing() {
            return None;
        }

        let name = if self.username.is_empty() {
            ANONYMOUS_TYPIST
        } else {
            self.username.as_str()
        };

        Some(format!("{name} is typing..."))
    }

    /// First step of a deletion, nothing changes until it is confirmed
    pub fn request_delete(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.store.contains(name) {
            return Err(StoreError::RoomNotFound(name.to_string()));
        }

        self.pending_deletion = Some(name.to_string());

        Ok(())
    }

    pub fn pending_deletion(&self) -> Option<&str> {
        self.pending_deletion.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_deletion = None;
    }

    /// Deletes the pending room. Returns its name, or `None` if nothing was pending.
    pub fn confirm_delete(&mut self) -> Result<Option<String>, StoreError> {
        let Some(name) = self.pending_deletion.take() else {
            return Ok(None);
        };

        let result = self.store.delete_room(&name);

        // the room is gone from memory even if writing it out failed
        if !self.store.contains(&name) && self.active_room.as_deref() == Some(name.as_str()) {
            self.leave_room();
        }

        result.map(|_| Some(name))
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.theme = self.theme.toggled();
        self.theme.save(self.store.storage_mut())?;

        Ok(self.theme)
    }
}

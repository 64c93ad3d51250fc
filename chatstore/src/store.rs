use chrono::Utc;

use crate::{
    model::{Message, Room, RoomMap, RoomSummary},
    storage::{Storage, ROOMS_KEY},
    StoreError,
};

/// RoomStore keeps the room mapping in memory and writes the whole mapping
/// to storage after every mutation
#[derive(Debug)]
pub struct RoomStore<S> {
    rooms: RoomMap,
    storage: S,
}

impl<S: Storage> RoomStore<S> {
    /// Loads the persisted rooms. Missing, unreadable or unparseable data yields an empty store.
    pub fn load(storage: S) -> Self {
        let rooms = match storage.get_item(ROOMS_KEY) {
            Ok(Some(serialized)) => match serde_json::from_str::<RoomMap>(&serialized) {
                Ok(rooms) => rooms,
                Err(err) => {
                    tracing::warn!(error = %err, "stored rooms are corrupt, starting empty");
                    RoomMap::new()
                }
            },
            Ok(None) => RoomMap::new(),
            Err(err) => {
                tracing::warn!(error = %err, "stored rooms are unavailable, starting empty");
                RoomMap::new()
            }
        };

        tracing::debug!(rooms = rooms.len(), "loaded room store");

        RoomStore { rooms, storage }
    }

    /// Room names with message counts, in creation order
    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.rooms
            .iter()
            .map(|(name, room)| RoomSummary {
                name: name.clone(),
                count: room.message_count(),
            })
            .collect()
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn create_room(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyRoomName);
        }
        if self.rooms.contains_key(name) {
            return Err(StoreError::DuplicateRoom(name.to_string()));
        }

        self.rooms.insert(name.to_string(), Room::default());
        tracing::debug!(room = name, "created room");

        self.persist()
    }

    pub fn delete_room(&mut self, name: &str) -> Result<(), StoreError> {
        // shift_remove keeps the remaining rooms in creation order
        if self.rooms.shift_remove(name).is_none() {
            return Err(StoreError::RoomNotFound(name.to_string()));
        }
        tracing::debug!(room = name, "deleted room");

        self.persist()
    }

    /// Appends a message to `room_name`, creating the room when it does not exist yet
    pub fn append_message(
        &mut self,
        room_name: &str,
        sender: &str,
        text: &str,
    ) -> Result<Message, StoreError> {
        let (room_name, sender, text) = (room_name.trim(), sender.trim(), text.trim());
        if room_name.is_empty() {
            return Err(StoreError::EmptyRoomName);
        }
        if text.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        if sender.is_empty() {
            return Err(StoreError::EmptySender);
        }

        let message = Message::new(sender, text, Utc::now());
        self.rooms
            .entry(room_name.to_string())
            .or_default()
            .messages
            .push(message.clone());
        tracing::debug!(room = room_name, sender, "appended message");

        self.persist()?;

        Ok(message)
    }

    /// Serializes the full mapping and writes it through to storage
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(&self.rooms)?;
        self.storage.set_item(ROOMS_KEY, &serialized)?;

        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, ReadOnlyStorage};

    fn empty_store() -> RoomStore<MemoryStorage> {
        RoomStore::load(MemoryStorage::new())
    }

    fn summary(name: &str, count: usize) -> RoomSummary {
        RoomSummary {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn test_load_without_data_is_empty() {
        assert!(empty_store().list_rooms().is_empty());
    }

    #[test]
    fn test_load_corrupt_data_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ROOMS_KEY, "{not json").unwrap();

        let store = RoomStore::load(storage);
        assert!(store.is_empty());
        // nothing is written back until the next mutation
        assert_eq!(
            store.storage().get_item(ROOMS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_create_duplicate_room_is_rejected() {
        let mut store = empty_store();
        store.create_room("x").unwrap();

        let result = store.create_room("x");
        assert!(matches!(result, Err(StoreError::DuplicateRoom(name)) if name == "x"));
        assert_eq!(store.list_rooms(), vec![summary("x", 0)]);
    }

    #[test]
    fn test_create_empty_room_name_is_rejected() {
        let mut store = empty_store();

        assert!(matches!(store.create_room(""), Err(StoreError::EmptyRoomName)));
        assert!(matches!(store.create_room("   "), Err(StoreError::EmptyRoomName)));
        assert!(store.is_empty());
        assert!(store.storage().get_item(ROOMS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_create_room_persists() {
        let mut store = empty_store();
        store.create_room("general").unwrap();

        assert_eq!(
            store.storage().get_item(ROOMS_KEY).unwrap().as_deref(),
            Some(r#"{"general":{"messages":[]}}"#)
        );
    }

    #[test]
    fn test_append_message_creates_missing_room() {
        let mut store = empty_store();
        store.append_message("lazy", "Ann", "hi").unwrap();

        assert_eq!(store.list_rooms(), vec![summary("lazy", 1)]);
    }

    #[test]
    fn test_append_message_room_name_is_trimmed() {
        let mut store = empty_store();
        store.create_room("general").unwrap();

        assert!(matches!(
            store.append_message("", "Ann", "hi"),
            Err(StoreError::EmptyRoomName)
        ));
        assert!(matches!(
            store.append_message("  ", "Ann", "hi"),
            Err(StoreError::EmptyRoomName)
        ));
        store.append_message(" general ", "Ann", "hi").unwrap();

        assert_eq!(store.list_rooms(), vec![summary("general", 1)]);
    }

    #[test]
    fn test_failed_write_keeps_appended_message() {
        let mut store = RoomStore::load(ReadOnlyStorage::default());

        let result = store.append_message("general", "Ann", "hi");
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(!result.unwrap_err().is_validation());

        assert_eq!(store.list_rooms(), vec![summary("general", 1)]);
        assert_eq!(store.room("general").unwrap().messages[0].text(), "hi");
    }

    #[test]
    fn test_append_message_validation() {
        let mut store = empty_store();
        store.create_room("general").unwrap();

        assert!(matches!(
            store.append_message("general", "Ann", "  "),
            Err(StoreError::EmptyMessage)
        ));
        assert!(matches!(
            store.append_message("general", "", "hi"),
            Err(StoreError::EmptySender)
        ));
        assert!(matches!(
            store.append_message("other", "", ""),
            Err(StoreError::EmptyMessage)
        ));
        assert_eq!(store.list_rooms(), vec![summary("general", 0)]);
    }

    #[test]
    fn test_append_message_keeps_call_order() {
        let mut store = empty_store();
        for i in 0..5 {
            store
                .append_message("general", "Ann", &format!("message {i}"))
                .unwrap();
        }

        assert_eq!(store.list_rooms(), vec![summary("general", 5)]);
        let texts: Vec<&str> = store
            .room("general")
            .unwrap()
            .messages
            .iter()
            .map(Message::text)
            .collect();
        assert_eq!(
            texts,
            vec!["message 0", "message 1", "message 2", "message 3", "message 4"]
        );
    }

    #[test]
    fn test_delete_room() {
        let mut store = empty_store();
        store.create_room("a").unwrap();
        store.create_room("b").unwrap();
        store.create_room("c").unwrap();

        store.delete_room("b").unwrap();
        assert_eq!(store.list_rooms(), vec![summary("a", 0), summary("c", 0)]);

        assert!(matches!(store.delete_room("b"), Err(StoreError::RoomNotFound(_))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_preserves_listing() {
        let mut store = empty_store();
        store.create_room("zeta").unwrap();
        store.append_message("alpha", "Ann", "hi").unwrap();
        store.append_message("alpha", "Bo", "yo").unwrap();
        let before = store.list_rooms();

        let reloaded = RoomStore::load(store.into_storage());
        assert_eq!(reloaded.list_rooms(), before);
    }

    #[test]
    fn test_general_room_scenario() {
        let mut store = empty_store();
        store.create_room("general").unwrap();
        store.append_message("general", "Ann", "hi").unwrap();
        store.append_message("general", "Bo", "yo").unwrap();

        assert_eq!(store.list_rooms(), vec![summary("general", 2)]);

        let messages = &store.room("general").unwrap().messages;
        assert_eq!((messages[0].sender(), messages[0].text()), ("Ann", "hi"));
        assert_eq!((messages[1].sender(), messages[1].text()), ("Bo", "yo"));
    }
}

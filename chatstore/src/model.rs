use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single chat message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author
    sender: String,
    /// The content of the message
    text: String,
    /// Creation time, serialized as an ISO-8601 string
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Message {
            sender: sender.into(),
            text: text.into(),
            timestamp,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A room owns its messages in chronological (insertion) order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub messages: Vec<Message>,
}

impl Room {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Room name to room record, iterated in insertion order
pub type RoomMap = IndexMap<String, Room>;

/// Listing entry for a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_message_serialization_field_names() {
        let message = Message::new("Ann", "hi", timestamp());

        let serialized = serde_json::to_string(&message).unwrap();
        assert!(serialized.starts_with(r#"{"sender":"Ann","text":"hi","timestamp":"2024-05-01T10:00:00"#));

        let deserialized: Message = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, message);
    }

    #[test]
    fn test_message_accepts_millisecond_iso_timestamps() {
        let deserialized: Message = serde_json::from_str(
            r#"{"sender":"Bo","text":"yo","timestamp":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(deserialized.sender(), "Bo");
        assert_eq!(deserialized.text(), "yo");
        assert_eq!(deserialized.timestamp(), timestamp());
    }

    #[test]
    fn test_room_map_keeps_insertion_order() {
        let serialized = r#"{"zeta":{"messages":[]},"alpha":{"messages":[]},"mid":{"messages":[]}}"#;

        let rooms: RoomMap = serde_json::from_str(serialized).unwrap();
        let names: Vec<&str> = rooms.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        assert_eq!(serde_json::to_string(&rooms).unwrap(), serialized);
    }

    #[test]
    fn test_room_without_messages_key_is_rejected() {
        assert!(serde_json::from_str::<RoomMap>(r#"{"general":{}}"#).is_err());
    }
}

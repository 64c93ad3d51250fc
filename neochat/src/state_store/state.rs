use chatstore::{
    controller::ChatController, model::RoomSummary, preferences::Theme, storage::Storage,
};
use chrono::Local;

/// A message prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub sender: String,
    pub text: String,
    /// Local wall clock time, HH:MM
    pub time: String,
    /// Written under the current display name
    pub is_sent: bool,
}

/// Snapshot of everything the UI renders. Rebuilt after each handled action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Rooms in creation order with their message counts
    pub rooms: Vec<RoomSummary>,
    /// Room currently open, `None` while in the lobby
    pub active_room: Option<String>,
    /// Messages of the open room
    pub messages: Vec<MessageView>,
    /// Remembered display name
    pub username: String,
    pub typing_indicator: Option<String>,
    pub theme: Theme,
    /// Room awaiting a delete confirmation
    pub pending_deletion: Option<String>,
    /// Blocking prompt to show, e.g. a rejected input
    pub notice: Option<String>,
}

impl State {
    pub fn capture<S: Storage>(controller: &ChatController<S>, notice: Option<String>) -> Self {
        let messages = controller
            .active_messages()
            .iter()
            .map(|message| MessageView {
                sender: message.sender().to_string(),
                text: message.text().to_string(),
                time: message
                    .timestamp()
                    .with_timezone(&Local)
                    .format("%H:%M")
                    .to_string(),
                is_sent: controller.is_sent(message),
            })
            .collect();

        State {
            rooms: controller.list_rooms(),
            active_room: controller.active_room().map(String::from),
            messages,
            username: controller.username().to_string(),
            typing_indicator: controller.typing_indicator(),
            theme: controller.theme(),
            pending_deletion: controller.pending_deletion().map(String::from),
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use chatstore::{storage::MemoryStorage, typing::DEFAULT_TYPING_IDLE};

    use super::*;

    #[test]
    fn test_capture_marks_sent_messages() {
        let mut controller = ChatController::load(MemoryStorage::new(), DEFAULT_TYPING_IDLE);
        controller.create_room("general").unwrap();
        controller.join_room("general").unwrap();
        controller.send_message("Bo", "yo").unwrap();
        controller.send_message("Ann", "hi").unwrap();

        let state = State::capture(&controller, None);

        assert_eq!(state.active_room.as_deref(), Some("general"));
        assert_eq!(state.username, "Ann");
        assert_eq!(
            state
                .messages
                .iter()
                .map(|m| (m.sender.as_str(), m.text.as_str(), m.is_sent))
                .collect::<Vec<_>>(),
            vec![("Bo", "yo", false), ("Ann", "hi", true)]
        );
        assert_eq!(state.messages[0].time.len(), 5);
    }

    #[test]
    fn test_capture_in_lobby_has_no_messages() {
        let mut controller = ChatController::load(MemoryStorage::new(), DEFAULT_TYPING_IDLE);
        controller.create_room("general").unwrap();

        let state = State::capture(&controller, Some("Room name already exists!".into()));

        assert!(state.active_room.is_none());
        assert!(state.messages.is_empty());
        assert_eq!(state.rooms.len(), 1);
        assert_eq!(state.notice.as_deref(), Some("Room name already exists!"));
    }
}

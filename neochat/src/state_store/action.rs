/// Requests coming from the UI, handled by the state store one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateRoom { name: String },
    /// Asks for a confirmation before anything is deleted
    RequestDeleteRoom { room: String },
    ConfirmDeleteRoom,
    CancelDeleteRoom,
    JoinRoom { room: String },
    LeaveRoom,
    SendMessage { sender: String, text: String },
    /// Fired on every change of the message being composed
    Typing,
    ToggleTheme,
    DismissNotice,
    Exit,
}

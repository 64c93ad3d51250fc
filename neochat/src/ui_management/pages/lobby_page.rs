use chatstore::{model::RoomSummary, preferences::Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, State},
    ui_management::{
        components::{
            input_box::{self, InputBox},
            popup,
            usage::{HasUsageInfo, KeyBinding, UsageInfo},
            Component, ComponentRender,
        },
        palette::Palette,
    },
};

const NO_ROOMS_MESSAGE: &str = "No rooms available";

struct Props {
    /// Rooms in creation order
    rooms: Vec<RoomSummary>,
    /// Room the user asked to delete
    pending_deletion: Option<String>,
    username: String,
    theme: Theme,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            rooms: state.rooms.clone(),
            pending_deletion: state.pending_deletion.clone(),
            username: state.username.clone(),
            theme: state.theme,
        }
    }
}

/// LobbyPage lists the rooms and handles creating, deleting and joining them
pub struct LobbyPage {
    action_tx: UnboundedSender<Action>,
    /// State Mapped LobbyPage Props
    props: Props,
    // Internal State
    /// Highlighted room
    list_state: ListState,
    /// Name prompt, open while a room is being created
    room_name_prompt: Option<InputBox>,
}

impl LobbyPage {
    fn selected_room(&self) -> Option<&RoomSummary> {
        self.list_state
            .selected()
            .and_then(|idx| self.props.rooms.get(idx))
    }

    fn next(&mut self) {
        if self.props.rooms.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.props.rooms.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.props.rooms.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.props.rooms.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Keeps the selection inside the room list after rooms were added or removed
    fn clamp_selection(&mut self) {
        let selected = match (self.list_state.selected(), self.props.rooms.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    fn send(&self, action: Action) {
        // the state store only goes away on shutdown
        let _ = self.action_tx.send(action);
    }

    fn handle_room_name_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.room_name_prompt.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Enter => {
                let name = prompt.text().to_string();
                self.room_name_prompt = None;
                self.send(Action::CreateRoom { name });
            }
            KeyCode::Esc => self.room_name_prompt = None,
            _ => {
                prompt.handle_key_event(key);
            }
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.send(Action::ConfirmDeleteRoom)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.send(Action::CancelDeleteRoom)
            }
            _ => (),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.previous(),
            KeyCode::Down => self.next(),
            KeyCode::Enter => {
                if let Some(room) = self.selected_room() {
                    self.send(Action::JoinRoom {
                        room: room.name.clone(),
                    });
                }
            }
            KeyCode::Char('n') => self.room_name_prompt = Some(InputBox::default()),
            KeyCode::Char('d') => {
                if let Some(room) = self.selected_room() {
                    self.send(Action::RequestDeleteRoom {
                        room: room.name.clone(),
                    });
                }
            }
            KeyCode::Char('t') => self.send(Action::ToggleTheme),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.send(Action::Exit)
            }
            KeyCode::Char('q') => self.send(Action::Exit),
            _ => (),
        }
    }
}

impl Component for LobbyPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        LobbyPage {
            action_tx,
            props: Props::from(state),
            list_state: ListState::default(),
            room_name_prompt: None,
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let mut page = LobbyPage {
            props: Props::from(state),
            ..self
        };
        page.clamp_selection();

        page
    }

    fn name(&self) -> &str {
        "Lobby"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.room_name_prompt.is_some() {
            self.handle_room_name_prompt_key(key);
        } else if self.props.pending_deletion.is_some() {
            self.handle_confirmation_key(key);
        } else {
            self.handle_browse_key(key);
        }
    }
}

impl ComponentRender<()> for LobbyPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let palette = Palette::for_theme(self.props.theme);
        let area = frame.size();
        frame.render_widget(Block::default().style(palette.base()), area);

        let [main, sidebar] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(area)
        else {
            panic!("The main layout should have 2 chunks")
        };

        let [container_header, container_rooms] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
            .split(main)
        else {
            panic!("The left layout should have 2 chunks")
        };

        let header = Paragraph::new(Line::from(vec![
            Span::from("NeoChat").bold(),
            Span::styled(" lobby, ", palette.muted()),
            Span::from(format!("{} rooms", self.props.rooms.len())),
        ]))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Welcome"));
        frame.render_widget(header, container_header);

        if self.props.rooms.is_empty() {
            let empty = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::from(NO_ROOMS_MESSAGE).italic()),
                Line::from(Span::styled("Press (n) to create one.", palette.muted())),
            ]))
            .alignment(Alignment::Center)
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(palette.hovered))
                    .title("Rooms"),
            );
            frame.render_widget(empty, container_rooms);
        } else {
            let room_items: Vec<ListItem> = self
                .props
                .rooms
                .iter()
                .map(|room| {
                    ListItem::new(Line::from(vec![
                        Span::from(format!("#{}", room.name)).bold(),
                        Span::styled(format!("  {} messages", room.count), palette.muted()),
                    ]))
                })
                .collect();

            let room_list = List::new(room_items)
                .style(palette.base())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::new().fg(palette.hovered))
                        .title("Rooms"),
                )
                .highlight_style(palette.highlight())
                .highlight_symbol(">");

            let mut list_state = self.list_state.clone();
            frame.render_stateful_widget(room_list, container_rooms, &mut list_state);
        }

        let [container_profile, container_usage] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)].as_ref())
            .split(sidebar)
        else {
            panic!("The sidebar layout should have 2 chunks")
        };

        let display_name = if self.props.username.is_empty() {
            String::from("(not set)")
        } else {
            self.props.username.clone()
        };
        let profile = Paragraph::new(Text::from(vec![
            Line::from(format!("Name: {display_name}")),
            Line::from(format!("Theme: {}", self.props.theme)),
        ]))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Profile"));
        frame.render_widget(profile, container_profile);

        let usage = Paragraph::new(self.usage_info().to_text(Style::new().fg(palette.active)))
            .style(palette.base())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);

        if let Some(prompt) = self.room_name_prompt.as_ref() {
            let area = popup::centered_rect(50, 3, area);
            frame.render_widget(Clear, area);
            prompt.render(
                frame,
                input_box::RenderProps {
                    title: "Enter room name".into(),
                    area,
                    style: palette.base(),
                    border_color: palette.active,
                    show_cursor: true,
                },
            );
        } else if let Some(room) = self.props.pending_deletion.as_ref() {
            popup::render_dialog(
                frame,
                "Confirm",
                Text::from(vec![
                    Line::from(format!(r#"Delete "{room}" permanently?"#)),
                    Line::from(Span::styled("(y) yes  (n) no", palette.muted())),
                ]),
                palette.base(),
                Style::new().fg(palette.active),
            );
        }
    }
}

impl HasUsageInfo for LobbyPage {
    fn usage_info(&self) -> UsageInfo {
        if self.room_name_prompt.is_some() {
            UsageInfo {
                description: Some("Name the new room".into()),
                bindings: vec![
                    KeyBinding::new(&["Enter"], "to create"),
                    KeyBinding::new(&["Esc"], "to cancel"),
                ],
            }
        } else if self.props.pending_deletion.is_some() {
            UsageInfo {
                description: Some("Deleting removes every message of the room".into()),
                bindings: vec![
                    KeyBinding::new(&["y", "Enter"], "to delete"),
                    KeyBinding::new(&["n", "Esc"], "to keep the room"),
                ],
            }
        } else {
            UsageInfo {
                description: Some("Pick a room to chat in".into()),
                bindings: vec![
                    KeyBinding::new(&["↑", "↓"], "to navigate"),
                    KeyBinding::new(&["Enter"], "to join room"),
                    KeyBinding::new(&["n"], "to create a room"),
                    KeyBinding::new(&["d"], "to delete a room"),
                    KeyBinding::new(&["t"], "to toggle the theme"),
                    KeyBinding::new(&["q"], "to exit"),
                ],
            }
        }
    }
}

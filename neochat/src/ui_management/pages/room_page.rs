use chatstore::preferences::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    state_store::{action::Action, MessageView, State},
    ui_management::{
        components::{
            input_box::{self, InputBox},
            usage::{HasUsageInfo, KeyBinding, UsageInfo},
            Component, ComponentRender,
        },
        palette::Palette,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    DisplayName,
    MessageInput,
}

impl Section {
    pub const COUNT: usize = 2;

    fn to_usize(&self) -> usize {
        match self {
            Section::DisplayName => 0,
            Section::MessageInput => 1,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Section::DisplayName => "Your Name",
            Section::MessageInput => "Message",
        }
    }
}

impl TryFrom<usize> for Section {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Section::DisplayName),
            1 => Ok(Section::MessageInput),
            _ => Err(()),
        }
    }
}

struct Props {
    /// The open room
    active_room: Option<String>,
    /// Messages of the open room in chronological order
    messages: Vec<MessageView>,
    typing_indicator: Option<String>,
    theme: Theme,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            active_room: state.active_room.clone(),
            messages: state.messages.clone(),
            typing_indicator: state.typing_indicator.clone(),
            theme: state.theme,
        }
    }
}

const NO_MESSAGES_MESSAGE: &str = "No messages yet. Say hello!";

/// RoomPage shows the messages of the open room and composes new ones
pub struct RoomPage {
    action_tx: UnboundedSender<Action>,
    /// State Mapped RoomPage Props
    props: Props,
    // Internal State
    /// Section receiving key presses
    active_section: Option<Section>,
    /// Section that is currently hovered
    last_hovered_section: Section,
    // Child Components
    display_name_input: InputBox,
    message_input: InputBox,
}

impl RoomPage {
    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn input_for_section_mut(&mut self, section: &Section) -> &mut InputBox {
        match section {
            Section::DisplayName => &mut self.display_name_input,
            Section::MessageInput => &mut self.message_input,
        }
    }

    fn hover_next(&mut self) {
        let next_idx = (self.last_hovered_section.to_usize() + 1) % Section::COUNT;
        if let Ok(section) = Section::try_from(next_idx) {
            self.last_hovered_section = section;
        }
    }

    fn hover_previous(&mut self) {
        let idx = self.last_hovered_section.to_usize();
        let previous_idx = (idx + Section::COUNT - 1) % Section::COUNT;
        if let Ok(section) = Section::try_from(previous_idx) {
            self.last_hovered_section = section;
        }
    }

    fn activate(&mut self, section: Section) {
        self.last_hovered_section = section.clone();
        self.active_section = Some(section);
    }

    fn calculate_border_color(&self, palette: &Palette, section: Section) -> Color {
        match (self.active_section.as_ref(), &self.last_hovered_section) {
            (Some(active_section), _) if active_section.eq(&section) => palette.active,
            (_, last_hovered_section) if last_hovered_section.eq(&section) => palette.hovered,
            _ => palette.muted,
        }
    }

    /// Sends the composed message. The input is only cleared when the message can be accepted.
    fn submit_message(&mut self) {
        let sender = self.display_name_input.text().trim().to_string();
        let text = self.message_input.text().trim().to_string();
        let (has_sender, has_text) = (!sender.is_empty(), !text.is_empty());

        self.send(Action::SendMessage { sender, text });

        if has_sender && has_text {
            self.message_input.reset();
        } else if has_text {
            // a name is missing, move the user over to it
            self.activate(Section::DisplayName);
        }
    }

    fn handle_idle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => {
                let section = self.last_hovered_section.clone();
                self.activate(section);
            }
            KeyCode::Left => self.hover_previous(),
            KeyCode::Right => self.hover_next(),
            KeyCode::Char('l') => self.send(Action::LeaveRoom),
            KeyCode::Char('t') => self.send(Action::ToggleTheme),
            KeyCode::Char('q') => self.send(Action::Exit),
            _ => (),
        }
    }

    fn handle_section_key(&mut self, section: Section, key: KeyEvent) {
        match (section, key.code) {
            (_, KeyCode::Esc) | (Section::DisplayName, KeyCode::Enter) => {
                self.active_section = None;
            }
            (Section::MessageInput, KeyCode::Enter) => self.submit_message(),
            (Section::MessageInput, _) => {
                if self.message_input.handle_key_event(key) {
                    self.send(Action::Typing);
                }
            }
            (section, _) => {
                self.input_for_section_mut(&section).handle_key_event(key);
            }
        }
    }

    fn message_line<'a>(&self, palette: &Palette, message: &'a MessageView) -> Line<'a> {
        let (sender_color, marker) = if message.is_sent {
            (palette.sent, " (you)")
        } else {
            (palette.received, "")
        };

        let line = Line::from(vec![
            Span::styled(format!("[{}] ", message.time), palette.muted()),
            Span::styled(message.sender.as_str(), palette.base().fg(sender_color)).bold(),
            Span::styled(marker, palette.muted()),
            Span::raw(": "),
            Span::raw(message.text.as_str()),
        ]);

        if message.is_sent {
            line.alignment(Alignment::Right)
        } else {
            line.alignment(Alignment::Left)
        }
    }
}

impl Component for RoomPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        RoomPage {
            action_tx,
            // no room yet, so an open room in `state` counts as entered
            props: Props {
                active_room: None,
                ..Props::from(state)
            },
            active_section: None,
            last_hovered_section: Section::MessageInput,
            display_name_input: InputBox::with_text(&state.username),
            message_input: InputBox::default(),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let entered_room =
            state.active_room.is_some() && state.active_room != self.props.active_room;

        let mut page = RoomPage {
            props: Props::from(state),
            ..self
        };

        // a freshly opened room starts with the cursor in the message input
        if entered_room {
            page.message_input.reset();
            if page.display_name_input.is_empty() {
                page.display_name_input.set_text(&state.username);
            }
            page.activate(Section::MessageInput);
        }

        page
    }

    fn name(&self) -> &str {
        "Room"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.send(Action::Exit);
            return;
        }

        match self.active_section.clone() {
            None => self.handle_idle_key(key),
            Some(section) => self.handle_section_key(section, key),
        }
    }
}

fn calculate_list_offset(height: u16, items_len: usize) -> usize {
    // 2 rows of the height go to the borders
    items_len.saturating_sub(height.saturating_sub(2) as usize)
}

impl ComponentRender<()> for RoomPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let palette = Palette::for_theme(self.props.theme);
        let area = frame.size();
        frame.render_widget(Block::default().style(palette.base()), area);

        let [main, sidebar] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
            .split(area)
        else {
            panic!("The main layout should have 2 chunks")
        };

        let [container_header, container_messages, container_typing, container_inputs] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(1),
                        Constraint::Length(1),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(main)
        else {
            panic!("The room layout should have 4 chunks")
        };

        let room_name = self.props.active_room.as_deref().unwrap_or_default();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("in ", palette.muted()),
            Span::from(format!("#{room_name}")).bold(),
            Span::styled(
                format!("  {} messages", self.props.messages.len()),
                palette.muted(),
            ),
        ]))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).title("Room"));
        frame.render_widget(header, container_header);

        // a Paragraph, unlike a List, honors the alignment of each line
        let message_lines: Vec<Line> = if self.props.messages.is_empty() {
            vec![Line::from(
                Span::styled(NO_MESSAGES_MESSAGE, palette.muted()).italic(),
            )]
        } else {
            let offset =
                calculate_list_offset(container_messages.height, self.props.messages.len());

            self.props
                .messages
                .iter()
                .skip(offset)
                .map(|message| self.message_line(&palette, message))
                .collect()
        };
        let messages = Paragraph::new(message_lines)
            .style(palette.base())
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        frame.render_widget(messages, container_messages);

        let typing = Paragraph::new(Line::from(Span::styled(
            self.props.typing_indicator.clone().unwrap_or_default(),
            palette.muted().add_modifier(Modifier::ITALIC),
        )))
        .style(palette.base());
        frame.render_widget(typing, container_typing);

        let [container_display_name, container_message_input] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
            .split(container_inputs)
        else {
            panic!("The input layout should have 2 chunks")
        };

        for (section, input, container) in [
            (
                Section::DisplayName,
                &self.display_name_input,
                container_display_name,
            ),
            (
                Section::MessageInput,
                &self.message_input,
                container_message_input,
            ),
        ] {
            let show_cursor = self.active_section.as_ref() == Some(&section);
            input.render(
                frame,
                input_box::RenderProps {
                    title: section.title().into(),
                    area: container,
                    style: palette.base(),
                    border_color: self.calculate_border_color(&palette, section),
                    show_cursor,
                },
            );
        }

        let usage = Paragraph::new(self.usage_info().to_text(Style::new().fg(palette.active)))
            .style(palette.base())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, sidebar);
    }
}

impl HasUsageInfo for RoomPage {
    fn usage_info(&self) -> UsageInfo {
        match self.active_section.as_ref() {
            Some(Section::MessageInput) => UsageInfo {
                description: Some("Type your message for the room".into()),
                bindings: vec![
                    KeyBinding::new(&["Enter"], "to send your message"),
                    KeyBinding::new(&["Esc"], "to stop typing"),
                ],
            },
            Some(Section::DisplayName) => UsageInfo {
                description: Some("The name your messages are sent under".into()),
                bindings: vec![KeyBinding::new(&["Enter", "Esc"], "when done")],
            },
            None => UsageInfo {
                description: Some("Select a widget".into()),
                bindings: vec![
                    KeyBinding::new(&["←", "→"], "to hover widgets"),
                    KeyBinding::new(&["e"], format!("to edit {}", self.last_hovered_section.title())),
                    KeyBinding::new(&["l"], "to leave the room"),
                    KeyBinding::new(&["t"], "to toggle the theme"),
                    KeyBinding::new(&["q"], "to exit"),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn room_state(username: &str, messages: Vec<MessageView>) -> State {
        State {
            active_room: Some("general".into()),
            username: username.into(),
            messages,
            ..State::default()
        }
    }

    fn message(sender: &str, text: &str, is_sent: bool) -> MessageView {
        MessageView {
            sender: sender.into(),
            text: text.into(),
            time: "10:00".into(),
            is_sent,
        }
    }

    fn page(state: &State) -> (RoomPage, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        (RoomPage::new(state, action_tx), action_rx)
    }

    fn type_str(page: &mut RoomPage, text: &str) {
        for c in text.chars() {
            page.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn rendered_lines(page: &RoomPage) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| page.render(frame, ())).unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol.clone())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_entering_room_focuses_message_input() {
        let (page, _action_rx) = page(&room_state("Ann", vec![]));

        assert_eq!(page.active_section, Some(Section::MessageInput));
        assert_eq!(page.display_name_input.text(), "Ann");
    }

    #[test]
    fn test_send_clears_input_and_signals_typing() {
        let (mut page, mut action_rx) = page(&room_state("Ann", vec![]));

        type_str(&mut page, "hi");
        page.handle_key_event(key(KeyCode::Enter));

        assert_eq!(action_rx.try_recv().unwrap(), Action::Typing);
        assert_eq!(action_rx.try_recv().unwrap(), Action::Typing);
        assert_eq!(
            action_rx.try_recv().unwrap(),
            Action::SendMessage {
                sender: "Ann".into(),
                text: "hi".into()
            }
        );
        assert!(page.message_input.is_empty());
    }

    #[test]
    fn test_send_without_name_keeps_text() {
        let (mut page, mut action_rx) = page(&room_state("", vec![]));

        type_str(&mut page, "hi");
        page.handle_key_event(key(KeyCode::Enter));

        let actions: Vec<Action> = std::iter::from_fn(|| action_rx.try_recv().ok()).collect();
        assert_eq!(
            actions.last(),
            Some(&Action::SendMessage {
                sender: "".into(),
                text: "hi".into()
            })
        );
        assert_eq!(page.message_input.text(), "hi");
        assert_eq!(page.active_section, Some(Section::DisplayName));
    }

    #[test]
    fn test_leave_room_from_idle() {
        let (mut page, mut action_rx) = page(&room_state("Ann", vec![]));

        page.handle_key_event(key(KeyCode::Esc));
        page.handle_key_event(key(KeyCode::Char('l')));

        assert_eq!(action_rx.try_recv().unwrap(), Action::LeaveRoom);
    }

    #[test]
    fn test_renders_empty_room_placeholder() {
        let (page, _action_rx) = page(&room_state("Ann", vec![]));

        let lines = rendered_lines(&page);
        assert!(lines.iter().any(|line| line.contains(NO_MESSAGES_MESSAGE)));
    }

    #[test]
    fn test_renders_messages_in_order() {
        let (page, _action_rx) = page(&room_state(
            "Bo",
            vec![message("Ann", "hi", false), message("Bo", "yo", true)],
        ));

        let lines = rendered_lines(&page);
        let ann = lines.iter().position(|line| line.contains("Ann: hi"));
        let bo = lines.iter().position(|line| line.contains("Bo (you): yo"));

        assert!(ann.is_some() && bo.is_some());
        assert!(ann < bo);
    }

    #[test]
    fn test_sent_messages_are_right_aligned() {
        let (page, _action_rx) = page(&room_state(
            "Bo",
            vec![message("Ann", "hi", false), message("Bo", "yo", true)],
        ));

        // the messages block spans columns 0..60, its borders sit at 0 and 59
        let inner = |line: &String| line.chars().skip(1).take(58).collect::<String>();
        let lines = rendered_lines(&page);

        let received = lines.iter().find(|line| line.contains("Ann: hi")).map(inner);
        let sent = lines.iter().find(|line| line.contains("Bo (you): yo")).map(inner);

        assert!(received.unwrap().starts_with("[10:00] Ann: hi"));
        assert!(sent.unwrap().ends_with("[10:00] Bo (you): yo"));
    }
}

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    prelude::Backend,
    style::Style,
    text::{Line, Span, Text},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use self::{lobby_page::LobbyPage, room_page::RoomPage};

use super::{
    components::{popup, Component, ComponentRender},
    palette::Palette,
};

mod lobby_page;
mod room_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivePage {
    Lobby,
    Room,
}

struct Props {
    active_page: ActivePage,
    /// Blocking prompt shown over the active page
    notice: Option<String>,
    palette: Palette,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            active_page: match state.active_room {
                Some(_) => ActivePage::Room,
                None => ActivePage::Lobby,
            },
            notice: state.notice.clone(),
            palette: Palette::for_theme(state.theme),
        }
    }
}

/// AppRouter shows the lobby or the open room, and any notice on top of them
pub struct AppRouter {
    action_tx: UnboundedSender<Action>,
    props: Props,
    //
    lobby_page: LobbyPage,
    room_page: RoomPage,
}

impl AppRouter {
    fn get_active_page_component(&self) -> &dyn Component {
        match self.props.active_page {
            ActivePage::Lobby => &self.lobby_page,
            ActivePage::Room => &self.room_page,
        }
    }

    fn get_active_page_component_mut(&mut self) -> &mut dyn Component {
        match self.props.active_page {
            ActivePage::Lobby => &mut self.lobby_page,
            ActivePage::Room => &mut self.room_page,
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            //
            lobby_page: LobbyPage::new(state, action_tx.clone()),
            room_page: RoomPage::new(state, action_tx),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            props: Props::from(state),
            //
            lobby_page: self.lobby_page.move_with_state(state),
            room_page: self.room_page.move_with_state(state),
            ..self
        }
    }

    // route all functions to the active page
    fn name(&self) -> &str {
        self.get_active_page_component().name()
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // any key acknowledges a notice, nothing reaches the page meanwhile
        if self.props.notice.is_some() {
            if key.kind == KeyEventKind::Press {
                let _ = self.action_tx.send(Action::DismissNotice);
            }
            return;
        }

        self.get_active_page_component_mut().handle_key_event(key)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: ()) {
        match self.props.active_page {
            ActivePage::Lobby => self.lobby_page.render(frame, props),
            ActivePage::Room => self.room_page.render(frame, props),
        }

        if let Some(notice) = self.props.notice.as_ref() {
            let palette = &self.props.palette;
            popup::render_dialog(
                frame,
                "Notice",
                Text::from(vec![
                    Line::from(notice.as_str()),
                    Line::from(Span::styled("Press any key to continue", palette.muted())),
                ]),
                palette.base(),
                Style::new().fg(palette.active),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn test_notice_swallows_keys() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let state = State {
            notice: Some("Please enter your name first".into()),
            ..State::default()
        };
        let mut router = AppRouter::new(&state, action_tx);

        router.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));

        assert_eq!(action_rx.try_recv().unwrap(), Action::DismissNotice);
        assert!(action_rx.try_recv().is_err());
    }

    #[test]
    fn test_routes_to_open_room() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let router = AppRouter::new(&State::default(), action_tx);
        assert_eq!(router.name(), "Lobby");

        let router = router.move_with_state(&State {
            active_room: Some("general".into()),
            ..State::default()
        });
        assert_eq!(router.name(), "Room");
    }
}

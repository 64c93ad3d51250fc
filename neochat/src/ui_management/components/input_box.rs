use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::{Backend, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ComponentRender;

/// Single line text editor. The cursor counts chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    /// Current value of the input box
    text: String,
    /// Position of cursor in chars from the start of the text
    cursor_position: usize,
}

impl InputBox {
    pub fn with_text(text: &str) -> Self {
        let mut input_box = InputBox::default();
        input_box.set_text(text);
        input_box
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, new_text: &str) {
        self.text = String::from(new_text);
        self.cursor_position = self.char_count();
    }

    pub fn reset(&mut self) {
        self.cursor_position = 0;
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_position)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.char_count());
    }

    fn enter_char(&mut self, new_char: char) {
        let idx = self.byte_index();
        self.text.insert(idx, new_char);

        self.move_cursor_right();
    }

    fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        self.move_cursor_left();
        let idx = self.byte_index();
        self.text.remove(idx);

        true
    }

    fn delete_char_at_cursor(&mut self) -> bool {
        if self.cursor_position >= self.char_count() {
            return false;
        }

        let idx = self.byte_index();
        self.text.remove(idx);

        true
    }

    /// Applies an editing key. Returns true when the text changed.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            // control chords are shortcuts, not text
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char(to_insert) => {
                self.enter_char(to_insert);
                true
            }
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_at_cursor(),
            KeyCode::Left => {
                self.move_cursor_left();
                false
            }
            KeyCode::Right => {
                self.move_cursor_right();
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                false
            }
            _ => false,
        }
    }
}

pub struct RenderProps {
    pub title: String,
    pub area: Rect,
    pub style: Style,
    pub border_color: Color,
    pub show_cursor: bool,
}

impl ComponentRender<RenderProps> for InputBox {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let input = Paragraph::new(self.text.as_str()).style(props.style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(props.style.fg(props.border_color))
                .title(props.title),
        );
        frame.render_widget(input, props.area);

        if props.show_cursor {
            // one cell right of the left border, one line below the top border
            frame.set_cursor(
                props.area.x + self.cursor_position() as u16 + 1,
                props.area.y + 1,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input_box: &mut InputBox, code: KeyCode) -> bool {
        input_box.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(input_box: &mut InputBox, text: &str) {
        for c in text.chars() {
            press(input_box, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut input_box = InputBox::default();
        type_str(&mut input_box, "hllo");
        press(&mut input_box, KeyCode::Home);
        press(&mut input_box, KeyCode::Right);
        assert!(press(&mut input_box, KeyCode::Char('e')));

        assert_eq!(input_box.text(), "hello");
        assert_eq!(input_box.cursor_position(), 2);
    }

    #[test]
    fn test_backspace_handles_multibyte_chars() {
        let mut input_box = InputBox::default();
        type_str(&mut input_box, "héé");

        assert!(press(&mut input_box, KeyCode::Backspace));
        assert_eq!(input_box.text(), "hé");
        assert_eq!(input_box.cursor_position(), 2);
    }

    #[test]
    fn test_cursor_moves_do_not_change_text() {
        let mut input_box = InputBox::with_text("ab");

        assert!(!press(&mut input_box, KeyCode::Right));
        assert_eq!(input_box.cursor_position(), 2);
        assert!(!press(&mut input_box, KeyCode::Delete));
        press(&mut input_box, KeyCode::Left);
        assert!(press(&mut input_box, KeyCode::Delete));
        assert_eq!(input_box.text(), "a");
    }

    #[test]
    fn test_control_chords_are_not_inserted() {
        let mut input_box = InputBox::with_text("ab");

        let changed =
            input_box.handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert!(!changed);
        assert_eq!(input_box.text(), "ab");

        let changed =
            input_box.handle_key_event(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert!(changed);
        assert_eq!(input_box.text(), "abA");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input_box = InputBox::with_text("ab");
        press(&mut input_box, KeyCode::Home);

        assert!(!press(&mut input_box, KeyCode::Backspace));
        assert_eq!(input_box.text(), "ab");
    }
}

use chatstore::preferences::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colors used by every page, picked from the active [Theme]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    /// Border of the hovered widget
    pub hovered: Color,
    /// Border of the widget receiving input
    pub active: Color,
    pub sent: Color,
    pub received: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                background: Color::Rgb(22, 24, 33),
                foreground: Color::Rgb(226, 228, 236),
                muted: Color::Rgb(128, 132, 150),
                hovered: Color::Rgb(110, 150, 255),
                active: Color::Rgb(255, 223, 102),
                sent: Color::Rgb(120, 220, 170),
                received: Color::Rgb(150, 180, 255),
                highlight_bg: Color::Rgb(255, 223, 102),
                highlight_fg: Color::Rgb(22, 24, 33),
            },
            Theme::Light => Palette {
                background: Color::Rgb(246, 246, 250),
                foreground: Color::Rgb(30, 32, 40),
                muted: Color::Rgb(120, 122, 135),
                hovered: Color::Rgb(40, 90, 220),
                active: Color::Rgb(200, 120, 0),
                sent: Color::Rgb(20, 130, 80),
                received: Color::Rgb(40, 70, 180),
                highlight_bg: Color::Rgb(40, 90, 220),
                highlight_fg: Color::Rgb(246, 246, 250),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

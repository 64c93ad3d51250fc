use ratatui::{
    prelude::{Backend, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Area of `height` rows and `percent_x` of the width, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [_, vertical_centered, _] = *Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area)
    else {
        panic!("The vertical popup layout should have 3 chunks")
    };

    let [_, both_centered, _] = *Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical_centered)
    else {
        panic!("The horizontal popup layout should have 3 chunks")
    };

    both_centered
}

/// Clears the centered area and draws a bordered dialog with `body` inside
pub fn render_dialog<B: Backend>(
    frame: &mut Frame<B>,
    title: &str,
    body: Text<'_>,
    style: Style,
    border_style: Style,
) {
    let area = centered_rect(50, body.height() as u16 + 2, frame.size());

    let dialog = Paragraph::new(body)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title.to_string()),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

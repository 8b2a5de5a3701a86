use crate::app::RangeEditor;
use crate::ui::layout::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::key_hint;

pub fn draw_range_editor(f: &mut Frame, editor: &RangeEditor) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Select plant range")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(inner);

    let fields = [
        ("Start at plant number", &editor.low),
        ("End at plant number", &editor.high),
    ];
    for (i, (label, value)) in fields.iter().enumerate() {
        let focused = editor.focus == i;
        let style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let field = Paragraph::new(value.as_str()).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(*label)
                .border_style(style),
        );
        f.render_widget(field, chunks[i]);
    }

    let mut first = Vec::new();
    first.extend(key_hint("Tab", " Switch  "));
    first.extend(key_hint("↑/↓", " +/-1  "));
    let mut second = Vec::new();
    second.extend(key_hint("Enter", " Apply  "));
    second.extend(key_hint("Esc", " Cancel"));
    let help = Paragraph::new(vec![Line::from(first), Line::from(second)])
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

pub fn draw_load_error(f: &mut Frame, message: &str) {
    let area = centered_rect(70, 40, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Press any key to return to the menu."),
    ];
    let error = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Could not load plant list"),
        );
    f.render_widget(error, area);
}

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use super::key_hint;

pub fn draw_list(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let Some(dataset) = app.dataset.as_deref() else {
        return;
    };

    let title = Paragraph::new(format!(
        "Full plant list: {} - Number of plants in the list: {}",
        dataset.name(),
        dataset.len()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let header = Row::new(vec!["Number", "Common name", "Scientific name"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = dataset
        .plants()
        .iter()
        .skip(app.list_offset)
        .map(|plant| {
            Row::new(vec![
                plant.number.to_string(),
                plant.common_name.clone(),
                plant.scientific_name.clone(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Percentage(40),
            Constraint::Percentage(50),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(table, chunks[1]);

    let mut spans = Vec::new();
    spans.extend(key_hint("↑/↓", " Scroll  "));
    spans.extend(key_hint("PgUp/PgDn", " Page  "));
    spans.extend(key_hint("Home", " Top  "));
    spans.extend(key_hint("Esc", " Quit to Menu"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

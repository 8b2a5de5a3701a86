use crate::app::App;
use crate::models::Mode;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::key_hint;

const DISCLAIMER: &str = "Practice the common and scientific names of plants. \
                          Pick a plant list, then a mode.";

fn draw_panel_header(area: Rect, title: &str, focused: bool, f: &mut Frame) {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

fn panel_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn item_style(selected: bool, focused: bool) -> Style {
    if selected && focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(Mode::ALL.len() as u16 + 3),
            Constraint::Length(4),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Plant Quiz v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let source_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);
    let mode_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);

    let sources_focused = app.focused_panel == 0;
    draw_panel_header(source_chunks[0], "[1] Plant lists", sources_focused, f);

    let names = app.catalog.names();
    let width = source_chunks[1].width.saturating_sub(6) as usize;
    let source_items: Vec<ListItem> = if names.is_empty() {
        vec![ListItem::new("No plant lists found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let loaded = app.source_name() == Some(*name);
                let marker = if loaded { "* " } else { "  " };
                let text = format!("{}{}", marker, truncate_string(name, width));
                ListItem::new(text).style(item_style(i == app.selected_source, sources_focused))
            })
            .collect()
    };
    f.render_widget(
        List::new(source_items).block(panel_block(sources_focused)),
        source_chunks[1],
    );

    let modes_focused = app.focused_panel == 1;
    draw_panel_header(mode_chunks[0], "[2] Modes", modes_focused, f);
    let mode_items: Vec<ListItem> = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            ListItem::new(mode.title()).style(item_style(i == app.selected_mode, modes_focused))
        })
        .collect();
    f.render_widget(
        List::new(mode_items).block(panel_block(modes_focused)),
        mode_chunks[1],
    );

    let footer_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let about = Paragraph::new(DISCLAIMER)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title("About"));
    f.render_widget(about, footer_chunks[0]);

    let mut spans = Vec::new();
    spans.extend(key_hint("1/2", " Focus Panel  "));
    spans.extend(key_hint("↑/↓", " Navigate  "));
    spans.extend(key_hint("Enter", " Select  "));
    spans.extend(key_hint("Esc/Ctrl+C", " Quit"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, footer_chunks[1]);
}

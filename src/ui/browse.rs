use crate::app::App;
use crate::error::QuizError;
use crate::ui::layout::calculate_browse_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{LEAF_GREEN, TEAL, key_hint};

pub fn draw_browse(f: &mut Frame, app: &App) {
    let layout = calculate_browse_chunks(f.area());
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let total = session
        .browse
        .remembered
        .as_ref()
        .map_or(0, |subset| subset.len());
    let position = if total == 0 {
        "No plants".to_string()
    } else {
        format!("Plant {} of {}", session.browse.index + 1, total)
    };
    let header = Paragraph::new(format!(
        "Practice plants - {} - {}",
        app.source_name().unwrap_or_default(),
        position
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let Some(plant) = session.browse_plant() else {
        let message = QuizError::EmptyRange {
            low: session.bounds.low,
            high: session.bounds.high,
        };
        let warning = Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(warning, layout.names_area);
        draw_help(f, layout.help_area);
        return;
    };

    let names = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            plant.common_name.as_str(),
            Style::default().fg(LEAF_GREEN).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            plant.scientific_name.as_str(),
            Style::default().fg(TEAL).add_modifier(Modifier::ITALIC),
        )),
    ]);
    let names = Paragraph::new(names)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("#{}", plant.number)),
        );
    f.render_widget(names, layout.names_area);

    let mut details = Text::default();
    if let Some(note) = plant.visible_note() {
        details.push_line(Line::from(Span::styled(
            "Extra info:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in note.lines() {
            details.push_line(Line::from(line.to_string()));
        }
    }
    if let Some(image) = &plant.image {
        if !details.lines.is_empty() {
            details.push_line(Line::from(""));
        }
        details.push_line(Line::from(vec![
            Span::styled("Image: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::from(image.as_str()),
        ]));
    }
    let details = Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(details, layout.details_area);

    draw_help(f, layout.help_area);
}

fn draw_help(f: &mut Frame, area: ratatui::layout::Rect) {
    let mut spans = Vec::new();
    spans.extend(key_hint("→/Enter", " Next plant  "));
    spans.extend(key_hint("←", " Previous  "));
    spans.extend(key_hint("Ctrl+R", " Range  "));
    spans.extend(key_hint("Ctrl+X", " Restart  "));
    spans.extend(key_hint("Esc", " Quit to Menu"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

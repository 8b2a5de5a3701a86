use crate::app::{App, Notice};
use crate::models::Mode;
use crate::session::SessionState;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::{calculate_wrapped_cursor_position, gauge_ratio};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::{LEAF_GREEN, key_hint};

pub fn draw_quiz(f: &mut Frame, app: &App, mode: Mode) {
    let layout = calculate_quiz_chunks(f.area());
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let header = Paragraph::new(format!(
        "{} - {} - plants {}-{}",
        mode.title(),
        app.source_name().unwrap_or_default(),
        session.bounds.low,
        session.bounds.high
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(LEAF_GREEN))
        .ratio(gauge_ratio(session.progress()))
        .label(format!(
            "Streak of correct answers: {} / {}",
            session.streak,
            session.subset_len()
        ));
    f.render_widget(progress, layout.progress_area);

    let prompt = session
        .question
        .as_ref()
        .map(|question| question.prompt.clone())
        .unwrap_or_else(|| "No question available.".to_string());
    let question = Paragraph::new(prompt)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    match mode {
        Mode::Expert => draw_answer_input(f, session, layout.answer_area),
        _ => draw_choices(f, session, app.highlighted, layout.answer_area),
    }

    draw_feedback(f, app.notice.as_ref(), layout.feedback_area);
    draw_help(f, session, mode, layout.help_area);
}

fn draw_choices(f: &mut Frame, session: &SessionState, highlighted: usize, area: Rect) {
    let mut text = Text::default();
    if let Some(question) = &session.question {
        let chosen = session.outcome.as_ref().map(|outcome| outcome.chosen.as_str());
        for (i, choice) in question.choices().into_iter().enumerate() {
            let marker = if i == 0 {
                "   "
            } else if chosen == Some(choice) || (!question.answered && i == highlighted) {
                "(•)"
            } else {
                "( )"
            };

            let style = if i == 0 {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else if question.answered && choice == question.correct_answer {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if question.answered && chosen == Some(choice) {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if question.answered {
                Style::default().fg(Color::DarkGray)
            } else if i == highlighted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let label = if i == 0 {
                format!("{} {}", marker, choice)
            } else {
                format!("{} {}. {}", marker, i, choice)
            };
            text.push_line(Line::from(Span::styled(label, style)));
            text.push_line(Line::from(""));
        }
    }

    let title = if session.question.as_ref().is_some_and(|q| q.answered) {
        "Answered"
    } else {
        "Select the right option"
    };
    let choices = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(choices, area);
}

fn draw_answer_input(f: &mut Frame, session: &SessionState, area: Rect) {
    let content = if session.input_buffer.is_empty() {
        Text::from(Span::styled(
            "[Type your answer and press Enter...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(session.input_buffer.as_str())
    };

    let input = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Your Answer"));
    f.render_widget(input, area);

    if session.question.is_some() {
        let text_width = area.width.saturating_sub(2) as usize;
        let (cursor_line, cursor_col) = calculate_wrapped_cursor_position(
            &session.input_buffer,
            session.cursor_position,
            text_width.max(1),
        );
        let cursor_x = area.x + 1 + cursor_col as u16;
        let cursor_y = area.y + 1 + cursor_line as u16;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_feedback(f: &mut Frame, notice: Option<&Notice>, area: Rect) {
    let line = match notice {
        Some(Notice::Correct) => Line::from(Span::styled(
            "🎉 Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Some(Notice::Incorrect { correct_answer }) => Line::from(vec![
            Span::styled(
                "❌ Wrong! The correct answer was ",
                Style::default().fg(Color::Red),
            ),
            Span::styled(
                correct_answer.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
        Some(Notice::Warning(message)) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };

    let feedback = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, area);
}

fn draw_help(f: &mut Frame, session: &SessionState, mode: Mode, area: Rect) {
    let answered = session.question.as_ref().is_some_and(|q| q.answered);

    let mut basic_spans = Vec::new();
    match mode {
        Mode::Expert => basic_spans.extend(key_hint("Enter", " Submit  ")),
        _ if answered => basic_spans.extend(key_hint("Enter", " Next plant  ")),
        _ => {
            basic_spans.extend(key_hint("↑/↓", " Choose  "));
            basic_spans.extend(key_hint("Enter/1-3", " Answer  "));
        }
    }
    basic_spans.extend(key_hint("Esc", " Quit to Menu"));

    let mut ctrl_spans = Vec::new();
    ctrl_spans.extend(key_hint("Ctrl+R", " Range  "));
    ctrl_spans.extend(key_hint("Ctrl+X", " Reset  "));
    ctrl_spans.extend(key_hint("Ctrl+C", " Exit App"));

    let help = Paragraph::new(vec![Line::from(basic_spans), Line::from(ctrl_spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to main menu? Your streak is kept.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

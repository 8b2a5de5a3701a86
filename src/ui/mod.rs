mod browse;
pub mod layout;
mod list;
mod menu;
mod quiz;
mod range;

use crate::app::App;
use crate::models::{AppState, Mode};
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

pub use browse::draw_browse;
pub use layout::{calculate_browse_chunks, calculate_quiz_chunks, centered_rect};
pub use list::draw_list;
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use range::{draw_load_error, draw_range_editor};

/// Green used for plant names and the progress bar.
pub const LEAF_GREEN: Color = Color::Rgb(0, 101, 45);
pub const TEAL: Color = Color::Rgb(43, 122, 120);

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Menu => draw_menu(f, app),
        AppState::Mode(mode) => draw_mode(f, app, mode),
        AppState::RangeEdit(mode) => {
            draw_mode(f, app, mode);
            draw_range_editor(f, &app.range_editor);
        }
        AppState::QuitConfirm(_) => draw_quit_confirmation(f),
        AppState::LoadError => draw_load_error(f, app.load_error.as_deref().unwrap_or_default()),
    }
}

fn draw_mode(f: &mut Frame, app: &App, mode: Mode) {
    match mode {
        Mode::Browse => draw_browse(f, app),
        Mode::ListAll => draw_list(f, app),
        Mode::MultipleChoice | Mode::Expert => draw_quiz(f, app, mode),
    }
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(label),
    ]
}

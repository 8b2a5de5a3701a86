pub mod app;
pub mod catalog;
pub mod config;
pub mod csv;
pub mod error;
pub mod filter;
pub mod logger;
pub mod models;
pub mod question;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::{App, Notice, RangeEditor};
pub use catalog::Catalog;
pub use config::{ColumnMap, Config, SourceConfig};
pub use crate::csv::{get_csv_files, load_csv, parse_plants};
pub use error::{QuizError, Result};
pub use filter::{ActiveSubset, Bounds, filter};
pub use models::{AppState, Dataset, Direction, Mode, NameField, Plant, Question};
pub use question::next_question;
pub use session::{Effect, Event, SessionState, transition};
pub use ui::draw;
pub use utils::{calculate_wrapped_cursor_position, truncate_string};

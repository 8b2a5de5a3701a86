use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::filter::Bounds;
use crate::models::{AppState, Dataset, Mode};
use crate::session::{Effect, Event, InputEdit, SessionState, transition};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Message shown under the question until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Correct,
    Incorrect { correct_answer: String },
    Warning(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeEditor {
    pub low: String,
    pub high: String,
    /// 0 edits `low`, 1 edits `high`.
    pub focus: usize,
}

impl RangeEditor {
    fn from_bounds(bounds: Bounds) -> Self {
        Self {
            low: bounds.low.to_string(),
            high: bounds.high.to_string(),
            focus: 0,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        if self.focus == 0 {
            &mut self.low
        } else {
            &mut self.high
        }
    }

    fn step(&mut self, delta: i64) {
        let field = self.field_mut();
        let value = field.parse::<i64>().unwrap_or(0).saturating_add(delta);
        *field = value.to_string();
    }

    /// Unparsable fields fall back to the current bounds.
    fn bounds(&self, current: Bounds) -> Bounds {
        Bounds::new(
            self.low.parse().unwrap_or(current.low),
            self.high.parse().unwrap_or(current.high),
        )
    }
}

pub struct App {
    pub state: AppState,
    pub catalog: Catalog,
    pub selected_source: usize,
    pub selected_mode: usize,
    pub focused_panel: usize,
    pub dataset: Option<Arc<Dataset>>,
    pub session: Option<SessionState>,
    /// Highlighted multiple-choice entry, 1-based like [`Event::Selected`].
    pub highlighted: usize,
    pub list_offset: usize,
    pub range_editor: RangeEditor,
    pub notice: Option<Notice>,
    pub load_error: Option<String>,
    pub initial_window: Option<usize>,
    pub initial_bounds: Option<(Option<i64>, Option<i64>)>,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(catalog: Catalog, initial_window: Option<usize>) -> Self {
        Self::with_rng(catalog, initial_window, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Catalog, initial_window: Option<usize>, rng: StdRng) -> Self {
        Self {
            state: AppState::Menu,
            catalog,
            selected_source: 0,
            selected_mode: 0,
            focused_panel: 0,
            dataset: None,
            session: None,
            highlighted: 1,
            list_offset: 0,
            range_editor: RangeEditor::default(),
            notice: None,
            load_error: None,
            initial_window,
            initial_bounds: None,
            should_quit: false,
            rng,
        }
    }

    pub fn current_mode(&self) -> Mode {
        Mode::ALL[self.selected_mode.min(Mode::ALL.len() - 1)]
    }

    pub fn source_name(&self) -> Option<&str> {
        self.dataset.as_deref().map(Dataset::name)
    }

    /// Loads the highlighted plant list, keeping the session when it is already active.
    pub fn select_source(&mut self) -> bool {
        let Some(name) = self
            .catalog
            .names()
            .get(self.selected_source)
            .map(|name| name.to_string())
        else {
            return false;
        };

        if self.source_name() == Some(name.as_str()) && self.session.is_some() {
            return true;
        }

        match self.catalog.load(&name) {
            Ok(dataset) => {
                let mut bounds = Bounds::initial(&dataset, self.initial_window);
                if let Some((low, high)) = self.initial_bounds.take() {
                    bounds = Bounds::new(low.unwrap_or(bounds.low), high.unwrap_or(bounds.high));
                }
                self.session = Some(SessionState::new(&dataset, bounds, self.current_mode()));
                self.dataset = Some(dataset);
                self.load_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(source = %name, error = %err, "failed to load plant list");
                self.dataset = None;
                self.session = None;
                self.load_error = Some(err.to_string());
                self.state = AppState::LoadError;
                false
            }
        }
    }

    pub fn enter_mode(&mut self, mode: Mode) {
        if !self.select_source() {
            return;
        }
        self.state = AppState::Mode(mode);
        self.highlighted = 1;
        self.list_offset = 0;
        self.notice = None;
        self.dispatch(Event::Entered(mode));
    }

    /// Runs one event through the session and turns effects into notices.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let Some(dataset) = self.dataset.clone() else {
            return Vec::new();
        };
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        let (session, effects) = transition(session, event, &dataset, &mut self.rng);
        self.session = Some(session);
        self.absorb(&effects);
        effects
    }

    fn absorb(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Correct => self.notice = Some(Notice::Correct),
                Effect::Incorrect { correct_answer } => {
                    self.notice = Some(Notice::Incorrect {
                        correct_answer: correct_answer.clone(),
                    })
                }
                Effect::RangeEmpty { low, high } => {
                    let message = QuizError::EmptyRange {
                        low: *low,
                        high: *high,
                    };
                    self.notice = Some(Notice::Warning(message.to_string()));
                }
                Effect::InsufficientOptions { distinct } => {
                    let message = QuizError::InsufficientOptions {
                        distinct: *distinct,
                    };
                    self.notice = Some(Notice::Warning(message.to_string()));
                }
                Effect::QuestionGenerated | Effect::SubsetChanged { .. } => {
                    self.highlighted = 1;
                }
                Effect::InputCleared | Effect::Ignored => {}
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_input(key),
            AppState::Mode(mode) => self.handle_mode_input(mode, key),
            AppState::RangeEdit(mode) => self.handle_range_input(mode, key),
            AppState::QuitConfirm(mode) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.state = AppState::Menu,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Mode(mode)
                }
                _ => {}
            },
            AppState::LoadError => {
                self.state = AppState::Menu;
                self.focused_panel = 0;
            }
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.focused_panel = 0,
            KeyCode::Char('2') => self.focused_panel = 1,
            KeyCode::Up => {
                if self.focused_panel == 0 {
                    self.selected_source = self.selected_source.saturating_sub(1);
                } else {
                    self.selected_mode = self.selected_mode.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.focused_panel == 0 {
                    if self.selected_source < self.catalog.len().saturating_sub(1) {
                        self.selected_source += 1;
                    }
                } else if self.selected_mode < Mode::ALL.len() - 1 {
                    self.selected_mode += 1;
                }
            }
            KeyCode::Enter => {
                if self.focused_panel == 0 {
                    if self.select_source() {
                        self.focused_panel = 1;
                    }
                } else {
                    self.enter_mode(self.current_mode());
                }
            }
            _ => {}
        }
    }

    fn handle_mode_input(&mut self, mode: Mode, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // Multiple-choice feedback stays until the question is advanced.
        if mode != Mode::MultipleChoice {
            self.notice = None;
        }

        match key.code {
            KeyCode::Esc => {
                self.state = AppState::QuitConfirm(mode);
                return;
            }
            KeyCode::Char('r') if ctrl => {
                if let Some(session) = &self.session {
                    self.range_editor = RangeEditor::from_bounds(session.bounds);
                    self.state = AppState::RangeEdit(mode);
                }
                return;
            }
            KeyCode::Char('x') if ctrl => {
                self.notice = None;
                self.dispatch(Event::Reset);
                return;
            }
            _ => {}
        }

        match mode {
            Mode::Browse => match key.code {
                KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => {
                    self.dispatch(Event::BrowseNext);
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    self.dispatch(Event::BrowsePrevious);
                }
                _ => {}
            },
            Mode::ListAll => {
                let total = self.dataset.as_ref().map_or(0, |d| d.len());
                match key.code {
                    KeyCode::Up => self.list_offset = self.list_offset.saturating_sub(1),
                    KeyCode::Down => {
                        self.list_offset = (self.list_offset + 1).min(total.saturating_sub(1))
                    }
                    KeyCode::PageUp => self.list_offset = self.list_offset.saturating_sub(10),
                    KeyCode::PageDown => {
                        self.list_offset = (self.list_offset + 10).min(total.saturating_sub(1))
                    }
                    KeyCode::Home => self.list_offset = 0,
                    _ => {}
                }
            }
            Mode::MultipleChoice => self.handle_choice_input(key),
            Mode::Expert => match key.code {
                KeyCode::Enter => {
                    let text = self
                        .session
                        .as_ref()
                        .map(|s| s.input_buffer.clone())
                        .unwrap_or_default();
                    self.dispatch(Event::Submitted(text));
                }
                KeyCode::Backspace => {
                    self.dispatch(Event::Edit(InputEdit::Backspace));
                }
                KeyCode::Left => {
                    self.dispatch(Event::Edit(InputEdit::Left));
                }
                KeyCode::Right => {
                    self.dispatch(Event::Edit(InputEdit::Right));
                }
                KeyCode::Char(c) if !ctrl => {
                    self.dispatch(Event::Edit(InputEdit::Insert(c)));
                }
                _ => {}
            },
        }
    }

    fn handle_choice_input(&mut self, key: KeyEvent) {
        let answered = self
            .session
            .as_ref()
            .and_then(|s| s.question.as_ref())
            .is_some_and(|q| q.answered);
        let option_count = self
            .session
            .as_ref()
            .and_then(|s| s.question.as_ref())
            .map_or(0, |q| q.options.len());

        match key.code {
            KeyCode::Up if !answered => {
                self.highlighted = self.highlighted.saturating_sub(1).max(1);
            }
            KeyCode::Down if !answered => {
                if self.highlighted < option_count {
                    self.highlighted += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') if !answered => {
                let index = c as usize - '0' as usize;
                if index <= option_count {
                    self.highlighted = index;
                    self.dispatch(Event::Selected(index));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if answered {
                    self.notice = None;
                    self.dispatch(Event::Advanced);
                } else {
                    self.dispatch(Event::Selected(self.highlighted));
                }
            }
            _ => {}
        }
    }

    fn handle_range_input(&mut self, mode: Mode, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Mode(mode),
            KeyCode::Tab | KeyCode::BackTab => {
                self.range_editor.focus = 1 - self.range_editor.focus.min(1);
            }
            KeyCode::Up => self.range_editor.step(1),
            KeyCode::Down => self.range_editor.step(-1),
            KeyCode::Backspace => {
                self.range_editor.field_mut().pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.range_editor.field_mut().push(c);
            }
            KeyCode::Enter => {
                let Some(current) = self.session.as_ref().map(|s| s.bounds) else {
                    self.state = AppState::Mode(mode);
                    return;
                };
                let bounds = self.range_editor.bounds(current);
                self.state = AppState::Mode(mode);
                self.notice = None;
                self.list_offset = 0;
                self.dispatch(Event::BoundsChanged {
                    low: bounds.low,
                    high: bounds.high,
                });
            }
            _ => {}
        }
    }
}

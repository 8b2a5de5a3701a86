use crate::error::QuizError;
use crate::filter::{ActiveSubset, Bounds, filter};
use crate::models::{Dataset, Mode, Plant, Question};
use crate::question::next_question;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Entered(Mode),
    /// Index into [`Question::choices`]; 0 is the placeholder.
    Selected(usize),
    Advanced,
    Submitted(String),
    Edit(InputEdit),
    BrowseNext,
    BrowsePrevious,
    BoundsChanged { low: i64, high: i64 },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QuestionGenerated,
    Correct,
    Incorrect { correct_answer: String },
    InputCleared,
    SubsetChanged { len: usize },
    RangeEmpty { low: i64, high: i64 },
    InsufficientOptions { distinct: usize },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub chosen: String,
    pub correct: bool,
}

/// Browse cursor plus the subset it was positioned against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseState {
    pub remembered: Option<ActiveSubset>,
    pub index: usize,
    pub reset_requested: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub mode: Mode,
    pub bounds: Bounds,
    /// `None` while the bounds select no plants.
    pub subset: Option<ActiveSubset>,
    pub streak: u32,
    pub question: Option<Question>,
    /// Multiple-choice verdict for the current question.
    pub outcome: Option<Outcome>,
    pub browse: BrowseState,
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl SessionState {
    pub fn new(dataset: &Dataset, bounds: Bounds, mode: Mode) -> Self {
        let bounds = bounds.clamp_to(dataset.number_range());
        let subset = filter(dataset, bounds.low, bounds.high).ok();
        Self {
            mode,
            bounds,
            subset,
            streak: 0,
            question: None,
            outcome: None,
            browse: BrowseState::default(),
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn subset_len(&self) -> usize {
        self.subset.as_ref().map_or(0, ActiveSubset::len)
    }

    /// `streak / |subset|`; not capped, so it can pass 1.0.
    pub fn progress(&self) -> f64 {
        match self.subset_len() {
            0 => 0.0,
            len => f64::from(self.streak) / len as f64,
        }
    }

    pub fn browse_plant(&self) -> Option<&Plant> {
        self.browse
            .remembered
            .as_ref()
            .and_then(|subset| subset.get(self.browse.index))
    }

    fn range_empty(&self) -> Effect {
        Effect::RangeEmpty {
            low: self.bounds.low,
            high: self.bounds.high,
        }
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        self.outcome = None;
        let generated = match self.subset.as_ref() {
            Some(subset) => next_question(subset, rng),
            None => {
                self.question = None;
                effects.push(self.range_empty());
                return;
            }
        };
        match generated {
            Ok(question) => {
                self.question = Some(question);
                effects.push(Effect::QuestionGenerated);
            }
            Err(QuizError::InsufficientOptions { distinct }) => {
                tracing::warn!(distinct, "not enough distinct names for a question");
                self.question = None;
                effects.push(Effect::InsufficientOptions { distinct });
            }
            Err(err) => {
                tracing::warn!(error = %err, "question generation failed");
                self.question = None;
                effects.push(Effect::Ignored);
            }
        }
    }

    fn ensure_question<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        let stale = self.question.as_ref().is_none_or(|question| question.answered);
        if stale {
            self.generate(rng, effects);
        }
    }

    fn sync_browse(&mut self) {
        let changed = self.browse.remembered.as_ref() != self.subset.as_ref();
        if self.browse.reset_requested || changed {
            self.browse = BrowseState {
                remembered: self.subset.clone(),
                index: 0,
                reset_requested: false,
            };
        }
    }

    fn record(&mut self, correct: bool) {
        if correct {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        tracing::debug!(correct, streak = self.streak, "answer recorded");
    }

    fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    fn edit_input(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(c) => {
                let at = byte_index(&self.input_buffer, self.cursor_position);
                self.input_buffer.insert(at, c);
                self.cursor_position += 1;
            }
            InputEdit::Backspace => {
                if self.cursor_position > 0 {
                    let at = byte_index(&self.input_buffer, self.cursor_position - 1);
                    self.input_buffer.remove(at);
                    self.cursor_position -= 1;
                }
            }
            InputEdit::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
            }
            InputEdit::Right => {
                if self.cursor_position < self.input_buffer.chars().count() {
                    self.cursor_position += 1;
                }
            }
        }
    }

    fn select<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.subset.is_none() {
            effects.push(self.range_empty());
            return effects;
        }
        if self.question.is_none() {
            self.ensure_question(rng, &mut effects);
            effects.push(Effect::Ignored);
            return effects;
        }
        let Some(question) = self.question.as_mut() else {
            return effects;
        };
        if question.answered || index == 0 {
            effects.push(Effect::Ignored);
            return effects;
        }
        let Some(chosen) = question.options.get(index - 1).cloned() else {
            effects.push(Effect::Ignored);
            return effects;
        };

        let correct = chosen == question.correct_answer;
        let correct_answer = question.correct_answer.clone();
        question.answered = true;
        self.outcome = Some(Outcome { chosen, correct });
        self.record(correct);

        effects.push(if correct {
            Effect::Correct
        } else {
            Effect::Incorrect { correct_answer }
        });
        effects
    }

    fn submit<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.subset.is_none() {
            effects.push(self.range_empty());
            return effects;
        }
        if self.question.is_none() {
            self.ensure_question(rng, &mut effects);
            effects.push(Effect::Ignored);
            return effects;
        }
        let Some(question) = self.question.as_ref() else {
            return effects;
        };
        if text.trim().is_empty() {
            effects.push(Effect::Ignored);
            return effects;
        }

        let correct = normalize_answer(text) == normalize_answer(&question.correct_answer);
        let correct_answer = question.correct_answer.clone();
        self.record(correct);
        effects.push(if correct {
            Effect::Correct
        } else {
            Effect::Incorrect { correct_answer }
        });

        self.clear_input();
        effects.push(Effect::InputCleared);
        self.generate(rng, &mut effects);
        effects
    }

    fn change_bounds<R: Rng + ?Sized>(
        &mut self,
        dataset: &Dataset,
        low: i64,
        high: i64,
        rng: &mut R,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        let bounds = Bounds::new(low, high).clamp_to(dataset.number_range());
        self.bounds = bounds;
        tracing::info!(low = bounds.low, high = bounds.high, "bounds changed");

        match filter(dataset, bounds.low, bounds.high) {
            Ok(subset) => {
                if self.subset.as_ref() != Some(&subset) {
                    let len = subset.len();
                    self.subset = Some(subset);
                    self.reset_progress();
                    effects.push(Effect::SubsetChanged { len });
                    self.enter_current_mode(rng, &mut effects);
                }
            }
            Err(_) => {
                self.subset = None;
                self.question = None;
                self.outcome = None;
                self.sync_browse();
                effects.push(self.range_empty());
            }
        }
        effects
    }

    fn reset_progress(&mut self) {
        self.streak = 0;
        self.question = None;
        self.outcome = None;
        self.browse.reset_requested = true;
        self.clear_input();
    }

    fn enter_current_mode<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        match self.mode {
            Mode::MultipleChoice | Mode::Expert => {
                if self.subset.is_none() {
                    effects.push(self.range_empty());
                } else {
                    self.ensure_question(rng, effects);
                }
            }
            Mode::Browse => {
                if self.subset.is_none() {
                    effects.push(self.range_empty());
                }
                self.sync_browse();
            }
            Mode::ListAll => {}
        }
    }
}

/// Trimmed and lower-cased, for free-text comparison.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

/// Applies one user event to the session.
pub fn transition<R: Rng + ?Sized>(
    mut state: SessionState,
    event: Event,
    dataset: &Dataset,
    rng: &mut R,
) -> (SessionState, Vec<Effect>) {
    let effects = match event {
        Event::Entered(mode) => {
            let mut effects = Vec::new();
            state.mode = mode;
            state.enter_current_mode(rng, &mut effects);
            effects
        }
        Event::Selected(index) => state.select(index, rng),
        Event::Advanced => {
            let mut effects = Vec::new();
            match state.question.as_ref() {
                Some(question) if question.answered => state.generate(rng, &mut effects),
                _ => effects.push(Effect::Ignored),
            }
            effects
        }
        Event::Submitted(text) => state.submit(&text, rng),
        Event::Edit(edit) => {
            state.edit_input(edit);
            Vec::new()
        }
        Event::BrowseNext => {
            state.sync_browse();
            match state.browse.remembered.as_ref().map(ActiveSubset::len) {
                Some(len) if len > 0 => {
                    state.browse.index = (state.browse.index + 1) % len;
                    Vec::new()
                }
                _ => vec![state.range_empty()],
            }
        }
        Event::BrowsePrevious => {
            state.sync_browse();
            if state.subset.is_none() {
                vec![state.range_empty()]
            } else {
                state.browse.index = state.browse.index.saturating_sub(1);
                Vec::new()
            }
        }
        Event::BoundsChanged { low, high } => state.change_bounds(dataset, low, high, rng),
        Event::Reset => {
            let mut effects = Vec::new();
            state.reset_progress();
            state.enter_current_mode(rng, &mut effects);
            effects
        }
    };

    (state, effects)
}

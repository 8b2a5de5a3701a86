use crate::error::{QuizError, Result};
use std::collections::HashSet;

/// Placeholder shown as the first multiple-choice entry before anything is picked.
pub const NO_SELECTION: &str = "Select an option";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub number: i64,
    pub common_name: String,
    pub scientific_name: String,
    pub note: Option<String>,
    pub image: Option<String>,
}

impl Plant {
    pub fn new(number: i64, common_name: &str, scientific_name: &str) -> Self {
        Self {
            number,
            common_name: common_name.to_string(),
            scientific_name: scientific_name.to_string(),
            note: None,
            image: None,
        }
    }

    /// Note text, only when it has visible content.
    pub fn visible_note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }

    pub fn name(&self, field: NameField) -> &str {
        match field {
            NameField::Common => &self.common_name,
            NameField::Scientific => &self.scientific_name,
        }
    }
}

/// Rows of one plant list, sorted by number with unique numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    plants: Vec<Plant>,
}

impl Dataset {
    /// Sorts by number and keeps the first row for any repeated number.
    pub fn new(name: impl Into<String>, mut plants: Vec<Plant>) -> Result<Self> {
        let name = name.into();
        plants.sort_by_key(|plant| plant.number);

        let mut seen = HashSet::new();
        let before = plants.len();
        plants.retain(|plant| seen.insert(plant.number));
        if plants.len() < before {
            tracing::warn!(
                source = %name,
                dropped = before - plants.len(),
                "dropped rows with a repeated number"
            );
        }

        if plants.is_empty() {
            return Err(QuizError::EmptyDataset(name));
        }

        Ok(Self { name, plants })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Smallest and largest number in the list.
    pub fn number_range(&self) -> (i64, i64) {
        let first = self.plants.first().map_or(0, |plant| plant.number);
        let last = self.plants.last().map_or(0, |plant| plant.number);
        (first, last)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Common,
    Scientific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Shows the scientific name, expects the common name.
    CommonFromScientific,
    /// Shows the common name, expects the scientific name.
    ScientificFromCommon,
}

impl Direction {
    pub const ALL: [Direction; 2] = [
        Direction::CommonFromScientific,
        Direction::ScientificFromCommon,
    ];

    pub fn answer_field(self) -> NameField {
        match self {
            Direction::CommonFromScientific => NameField::Common,
            Direction::ScientificFromCommon => NameField::Scientific,
        }
    }

    pub fn shown_field(self) -> NameField {
        match self {
            Direction::CommonFromScientific => NameField::Scientific,
            Direction::ScientificFromCommon => NameField::Common,
        }
    }

    pub fn prompt(self, shown: &str) -> String {
        match self {
            Direction::CommonFromScientific => format!("What is the common name of '{}'?", shown),
            Direction::ScientificFromCommon => {
                format!("What is the scientific name of '{}'?", shown)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub direction: Direction,
    pub correct_answer: String,
    /// The three candidate answers in presentation order.
    pub options: Vec<String>,
    pub plant: Plant,
    pub answered: bool,
}

impl Question {
    /// Multiple-choice entries: the placeholder followed by the options.
    pub fn choices(&self) -> Vec<&str> {
        std::iter::once(NO_SELECTION)
            .chain(self.options.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    ListAll,
    MultipleChoice,
    Expert,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Browse,
        Mode::ListAll,
        Mode::MultipleChoice,
        Mode::Expert,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Mode::Browse => "Practice plants",
            Mode::ListAll => "Full plant list",
            Mode::MultipleChoice => "Test knowledge (Multiple choice)",
            Mode::Expert => "Test knowledge (Expert)",
        }
    }

    pub fn is_quiz(self) -> bool {
        matches!(self, Mode::MultipleChoice | Mode::Expert)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Mode(Mode),
    RangeEdit(Mode),
    QuitConfirm(Mode),
    LoadError,
}

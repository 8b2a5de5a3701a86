use crate::error::{QuizError, Result};
use crate::models::{Dataset, Plant};

/// Inclusive number range chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub low: i64,
    pub high: i64,
}

impl Bounds {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn full(dataset: &Dataset) -> Self {
        let (low, high) = dataset.number_range();
        Self { low, high }
    }

    /// The first `window` plants of the list, or the whole list.
    pub fn initial(dataset: &Dataset, window: Option<usize>) -> Self {
        let full = Self::full(dataset);
        match window {
            Some(size) if size > 0 && size < dataset.len() => Self {
                low: full.low,
                high: dataset.plants()[size - 1].number,
            },
            _ => full,
        }
    }

    /// Pulls both ends into `range` and lifts `high` to `low` when they cross.
    pub fn clamp_to(self, (min, max): (i64, i64)) -> Self {
        let low = self.low.clamp(min, max);
        let high = self.high.clamp(min, max).max(low);
        Self { low, high }
    }

    pub fn contains(&self, number: i64) -> bool {
        self.low <= number && number <= self.high
    }
}

/// The plants currently in play, in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSubset {
    plants: Vec<Plant>,
}

impl ActiveSubset {
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Plant> {
        self.plants.get(index)
    }
}

pub fn filter(dataset: &Dataset, low: i64, high: i64) -> Result<ActiveSubset> {
    let bounds = Bounds::new(low, high);
    let plants: Vec<Plant> = dataset
        .plants()
        .iter()
        .filter(|plant| bounds.contains(plant.number))
        .cloned()
        .collect();

    if plants.is_empty() {
        return Err(QuizError::EmptyRange { low, high });
    }

    Ok(ActiveSubset { plants })
}

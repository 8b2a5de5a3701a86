use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(
        "The plant list must contain the following columns: {} (missing: {})",
        required.join(", "),
        missing.join(", ")
    )]
    Schema {
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Plant list '{0}' contains no usable rows")]
    EmptyDataset(String),

    #[error("Unknown plant list: {0}")]
    UnknownSource(String),

    #[error("No plants found in range {low}-{high}. Adjust the range with Ctrl+R.")]
    EmptyRange { low: i64, high: i64 },

    #[error("Need at least 3 distinct names in the range to build a question, found {distinct}")]
    InsufficientOptions { distinct: usize },
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_required_columns() {
        let err = QuizError::Schema {
            required: vec!["Nummer".to_string(), "Nederlands".to_string()],
            missing: vec!["Nederlands".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("Nummer, Nederlands"));
        assert!(message.contains("missing: Nederlands"));
    }

    #[test]
    fn test_empty_range_message_mentions_bounds() {
        let err = QuizError::EmptyRange { low: 4, high: 9 };
        assert!(err.to_string().contains("4-9"));
    }
}

use thiserror::Error;

/// Failures raised by the numeric core when its inputs break a table contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BioAgeError {
    #[error("Column '{0}' was not found in the table")]
    MissingColumn(String),

    #[error("Predictor gene '{0}' is not present in the expression table")]
    MissingGene(String),

    #[error("Gene '{0}' has more than one predictor coefficient")]
    DuplicateGene(String),

    #[error("Column '{0}' occurs more than once")]
    DuplicateColumn(String),

    #[error("Non-numeric value '{value}' in column '{column}' of row '{row}'")]
    NonNumeric {
        row: String,
        column: String,
        value: String,
    },

    #[error("Row '{row}' has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: String,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} values but received {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, BioAgeError>;

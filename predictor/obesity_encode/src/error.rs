use thiserror::Error;

/// Failure to turn a submission into a feature vector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("unknown category '{value}' for column {column}")]
    UnknownCategory { column: String, value: String },
    #[error("input has no field for column {0}")]
    MissingField(String),
    #[error("column {column} expects a {expected} value")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
    #[error("column {0} is not a finite number")]
    NonFinite(String),
    #[error("no lookup table for column {0}")]
    MissingTable(String),
}

/// A lookup table that violates its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table is empty")]
    Empty,
    #[error("label '{0}' appears more than once")]
    DuplicateLabel(String),
    #[error("{labels} labels but {ranks} ranks")]
    RankCountMismatch { labels: usize, ranks: usize },
    #[error("rank of '{label}' is not above the rank of the label before it")]
    NotIncreasing { label: String },
    #[error("column {0} is declared both nominal and ordinal")]
    Conflict(String),
    #[error("column {0} is listed more than once in the schema")]
    DuplicateColumn(String),
}

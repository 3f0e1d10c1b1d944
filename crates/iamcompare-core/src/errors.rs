use crate::Year;
use thiserror::Error;

/// Error type for invalid operations on panels, meta tables and statistics.
#[derive(Error, Debug)]
pub enum IamError {
    #[error("{0}")]
    Error(String),
    #[error("Year {0} is not on the panel year axis")]
    UnknownYear(Year),
    #[error("Year axis must be strictly increasing, got {0:?}")]
    InvalidYearAxis(Vec<Year>),
    #[error("Row for {model} / {scenario} / {variable} has {actual} values, expected {expected}")]
    RowLength {
        model: String,
        scenario: String,
        variable: String,
        expected: usize,
        actual: usize,
    },
    #[error("Column {column} has {actual} values, but the meta table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("Column {0} is not present in the meta table")]
    MissingColumn(String),
    #[error("Model {0} is not present in the meta table")]
    UnknownModel(String),
    #[error("Input sequences have different lengths ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("At least {required} values are required, got {actual}")]
    NotEnoughValues { required: usize, actual: usize },
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience type for `Result<T, IamError>`.
pub type IamResult<T> = Result<T, IamError>;

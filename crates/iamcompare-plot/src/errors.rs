use iamcompare_core::errors::IamError;
use iamcompare_indicators::IndicatorError;
use thiserror::Error;

/// Error type for building figures.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Core(#[from] IamError),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
    #[error("Failed to serialise figure: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid subplot layout: {0}")]
    InvalidLayout(String),
    #[error("Figure has no subplot in column {0}")]
    UnknownSubplot(usize),
    #[error("No values to plot for {0}")]
    EmptySelection(String),
}

/// Convenience type for `Result<T, PlotError>`.
pub type PlotResult<T> = Result<T, PlotError>;

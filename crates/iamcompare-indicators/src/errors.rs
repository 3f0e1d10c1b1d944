use iamcompare_core::errors::IamError;
use thiserror::Error;

/// Error type for indicator calculations.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error(transparent)]
    Core(#[from] IamError),
    #[error("Invalid parameters for {indicator}: {reason}")]
    InvalidParameters {
        indicator: &'static str,
        reason: String,
    },
}

/// Convenience type for `Result<T, IndicatorError>`.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    /// A rate was requested that the run did not resolve up front.
    #[error("Exchange rate was not planned for this run: {0}")]
    RateNotPlanned(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Converter cache error: {0}")]
    CacheError(String),
}

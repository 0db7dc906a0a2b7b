use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("User {0} has no base currency")]
    NoBaseCurrency(String),

    #[error("{0} is already the base currency")]
    AlreadyBaseCurrency(String),
}

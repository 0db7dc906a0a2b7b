//! User currencies module - the per-user currency set and its base flag.

mod currencies_errors;
mod currencies_model;
mod currencies_traits;

pub use currencies_errors::CurrencyError;
pub use currencies_model::UserCurrency;
pub use currencies_traits::UserCurrencyRepositoryTrait;

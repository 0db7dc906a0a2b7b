//! FX (Foreign Exchange) module - domain models, services, and traits.

pub mod currency_converter;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;
mod rate_table;

#[cfg(test)]
mod fx_service_tests;

pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
pub use fx_model::{ExchangeRate, NewExchangeRate};
pub use fx_service::FxService;
pub use fx_traits::{ExchangeRateResolver, FxRepositoryTrait, FxServiceTrait};
pub use rate_table::{RateKey, RatePlan, RateSource, RateTable};

use super::fx_model::{ExchangeRate, NewExchangeRate};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait defining the contract for FX repository operations.
#[async_trait]
pub trait FxRepositoryTrait: Send + Sync {
    fn get_historical_exchange_rates(&self) -> Result<Vec<ExchangeRate>>;
    async fn save_exchange_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate>;
}

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    fn initialize(&self) -> Result<()>;

    fn get_exchange_rate_for_date(
        &self,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal>;

    async fn add_exchange_rate(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate>;
}

/// Source of exchange rates for ref-amount computations.
///
/// `get_rate(user, date, base, quote)` returns how many units of `quote` one
/// unit of `base` is worth on `date`. Implementations must return a positive
/// rate or an error.
#[async_trait]
pub trait ExchangeRateResolver: Send + Sync {
    async fn get_rate(
        &self,
        user_id: &str,
        date: NaiveDate,
        base_code: &str,
        quote_code: &str,
    ) -> Result<Decimal>;
}

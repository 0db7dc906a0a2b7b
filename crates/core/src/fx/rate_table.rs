//! Per-run exchange rate snapshot.
//!
//! A rebase first walks its rows with a [`RatePlan`] to learn which
//! `(date, base, quote)` rates it needs, resolves each of them once into a
//! [`RateTable`], then recalculates against the table only.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_traits::ExchangeRateResolver;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateKey {
    pub date: NaiveDate,
    pub base: String,
    pub quote: String,
}

impl RateKey {
    pub fn new(date: NaiveDate, base: &str, quote: &str) -> Self {
        Self {
            date,
            base: base.to_string(),
            quote: quote.to_string(),
        }
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} on {}", self.base, self.quote, self.date)
    }
}

/// Anything recalculators can ask for a rate.
pub trait RateSource {
    fn rate(&mut self, date: NaiveDate, base: &str, quote: &str) -> Result<Decimal>;
}

/// Collects the rate keys a run will need.
///
/// Answers every request with `1` so the caller's arithmetic still runs.
#[derive(Debug, Default, Clone)]
pub struct RatePlan {
    keys: BTreeSet<RateKey>,
}

impl RatePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RateKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl RateSource for RatePlan {
    fn rate(&mut self, date: NaiveDate, base: &str, quote: &str) -> Result<Decimal> {
        if base != quote {
            self.keys.insert(RateKey::new(date, base, quote));
        }
        Ok(Decimal::ONE)
    }
}

/// Resolved rates of one run.
#[derive(Debug, Default, Clone)]
pub struct RateTable {
    rates: HashMap<RateKey, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every planned key exactly once.
    pub async fn resolve(
        plan: &RatePlan,
        resolver: &dyn ExchangeRateResolver,
        user_id: &str,
    ) -> Result<Self> {
        let mut table = RateTable::new();
        for key in plan.keys() {
            let rate = resolver
                .get_rate(user_id, key.date, &key.base, &key.quote)
                .await?;
            table.insert(key.clone(), rate)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: RateKey, rate: Decimal) -> Result<()> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!("{} resolved to {}", key, rate)).into());
        }
        self.rates.insert(key, rate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateSource for RateTable {
    fn rate(&mut self, date: NaiveDate, base: &str, quote: &str) -> Result<Decimal> {
        if base == quote {
            return Ok(Decimal::ONE);
        }
        let key = RateKey::new(date, base, quote);
        self.rates
            .get(&key)
            .copied()
            .ok_or_else(|| FxError::RateNotPlanned(key.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_plan_deduplicates_and_skips_same_currency() {
        let mut plan = RatePlan::new();
        plan.rate(day(1), "EUR", "USD").unwrap();
        plan.rate(day(1), "EUR", "USD").unwrap();
        plan.rate(day(2), "EUR", "USD").unwrap();
        plan.rate(day(2), "USD", "USD").unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_table_rejects_unplanned_keys() {
        let mut table = RateTable::new();
        table.insert(RateKey::new(day(1), "EUR", "USD"), dec!(1.1)).unwrap();

        assert_eq!(table.rate(day(1), "EUR", "USD").unwrap(), dec!(1.1));
        assert_eq!(table.rate(day(9), "USD", "USD").unwrap(), Decimal::ONE);
        let missing = table.rate(day(2), "EUR", "USD");
        assert!(matches!(missing, Err(Error::Fx(FxError::RateNotPlanned(_)))));
    }

    #[test]
    fn test_table_rejects_non_positive_rates() {
        let mut table = RateTable::new();
        let result = table.insert(RateKey::new(day(1), "EUR", "USD"), dec!(-1));
        assert!(matches!(result, Err(Error::Fx(FxError::InvalidRate(_)))));
        assert!(table.is_empty());
    }
}

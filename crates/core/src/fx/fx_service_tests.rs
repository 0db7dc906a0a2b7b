use super::*;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockFxRepository {
    rates: Mutex<Vec<ExchangeRate>>,
}

#[async_trait]
impl FxRepositoryTrait for MockFxRepository {
    fn get_historical_exchange_rates(&self) -> Result<Vec<ExchangeRate>> {
        Ok(self.rates.lock().unwrap().clone())
    }

    async fn save_exchange_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate> {
        let mut rates = self.rates.lock().unwrap();
        let saved = ExchangeRate {
            id: format!("rate-{}", rates.len() + 1),
            from_currency: rate.from_currency,
            to_currency: rate.to_currency,
            rate: rate.rate,
            date: rate.date,
            created_at: rate.date.and_hms_opt(0, 0, 0).unwrap(),
        };
        rates.push(saved.clone());
        Ok(saved)
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn new_rate(from: &str, to: &str, rate: rust_decimal::Decimal, d: u32) -> NewExchangeRate {
    NewExchangeRate {
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        rate,
        date: day(d),
    }
}

#[tokio::test]
async fn test_same_currency_resolves_to_one_without_rates() {
    let service = FxService::new(Arc::new(MockFxRepository::default()));
    service.initialize().unwrap();

    let rate = service.get_rate("user-1", day(1), "EUR", "EUR").await.unwrap();
    assert_eq!(rate, dec!(1));
}

#[tokio::test]
async fn test_missing_rate_is_reported() {
    let service = FxService::new(Arc::new(MockFxRepository::default()));
    service.initialize().unwrap();

    let result = service.get_rate("user-1", day(1), "EUR", "USD").await;
    assert!(matches!(result, Err(Error::Fx(FxError::RateNotFound(_)))));
}

#[tokio::test]
async fn test_added_rate_is_visible_immediately() {
    let service = FxService::new(Arc::new(MockFxRepository::default()));
    service.initialize().unwrap();

    let saved = service
        .add_exchange_rate(new_rate("eur", " usd", dec!(1.08), 3))
        .await
        .unwrap();
    assert_eq!(saved.from_currency, "EUR");
    assert_eq!(saved.to_currency, "USD");

    let forward = service.get_rate("user-1", day(3), "EUR", "USD").await.unwrap();
    assert_eq!(forward, dec!(1.08));
    let inverse = service
        .get_exchange_rate_for_date("USD", "EUR", day(3))
        .unwrap();
    assert_eq!((inverse * dec!(1.08)).round_dp(10), dec!(1));
}

#[tokio::test]
async fn test_add_rejects_invalid_rates() {
    let service = FxService::new(Arc::new(MockFxRepository::default()));

    let negative = service
        .add_exchange_rate(new_rate("EUR", "USD", dec!(-1), 3))
        .await;
    assert!(matches!(negative, Err(Error::Fx(FxError::InvalidRate(_)))));

    let same_pair = service
        .add_exchange_rate(new_rate("EUR", "EUR", dec!(1), 3))
        .await;
    assert!(matches!(same_pair, Err(Error::Validation(_))));
}

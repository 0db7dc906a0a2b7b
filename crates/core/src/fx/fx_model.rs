use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::fx::FxError;

/// A historical rate: one unit of `from_currency` is worth `rate` units of
/// `to_currency` on `date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub date: NaiveDate,
}

impl NewExchangeRate {
    /// Normalizes currency codes to upper case and rejects unusable rates.
    pub fn validate(mut self) -> Result<Self> {
        self.from_currency = self.from_currency.trim().to_uppercase();
        self.to_currency = self.to_currency.trim().to_uppercase();

        if self.from_currency.is_empty() {
            return Err(ValidationError::MissingField("fromCurrency".to_string()).into());
        }
        if self.to_currency.is_empty() {
            return Err(ValidationError::MissingField("toCurrency".to_string()).into());
        }
        if self.from_currency == self.to_currency {
            return Err(ValidationError::InvalidInput(format!(
                "Exchange rate pair must use two different currencies, got {}",
                self.from_currency
            ))
            .into());
        }
        if self.rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "{}/{} rate must be positive, got {}",
                self.from_currency, self.to_currency, self.rate
            ))
            .into());
        }
        Ok(self)
    }
}

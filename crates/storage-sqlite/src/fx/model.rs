use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use ledgerly_core::errors::{Error, Result};
use ledgerly_core::fx::ExchangeRate;

use crate::utils::parse_decimal;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ExchangeRateDB> for ExchangeRate {
    type Error = Error;

    fn try_from(db: ExchangeRateDB) -> Result<Self> {
        Ok(Self {
            rate: parse_decimal(&db.rate, "exchange_rates.rate")?,
            id: db.id,
            from_currency: db.from_currency,
            to_currency: db.to_currency,
            date: db.date,
            created_at: db.created_at,
        })
    }
}

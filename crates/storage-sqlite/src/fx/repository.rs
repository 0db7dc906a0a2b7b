use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use ledgerly_core::errors::Result;
use ledgerly_core::fx::{ExchangeRate, FxRepositoryTrait, NewExchangeRate};

use super::model::ExchangeRateDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::exchange_rates;
use crate::utils::format_decimal;

#[derive(Clone)]
pub struct FxRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl FxRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FxRepositoryTrait for FxRepository {
    fn get_historical_exchange_rates(&self) -> Result<Vec<ExchangeRate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchange_rates::table
            .order((
                exchange_rates::from_currency.asc(),
                exchange_rates::to_currency.asc(),
                exchange_rates::date.asc(),
            ))
            .select(ExchangeRateDB::as_select())
            .load::<ExchangeRateDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(ExchangeRate::try_from).collect()
    }

    /// Inserts the rate, replacing any stored rate of the same pair and date.
    async fn save_exchange_rate(&self, rate: NewExchangeRate) -> Result<ExchangeRate> {
        self.writer
            .exec(move |conn| {
                let row = ExchangeRateDB {
                    id: uuid::Uuid::new_v4().to_string(),
                    from_currency: rate.from_currency,
                    to_currency: rate.to_currency,
                    rate: format_decimal(&rate.rate),
                    date: rate.date,
                    created_at: Utc::now().naive_utc(),
                };

                diesel::insert_into(exchange_rates::table)
                    .values(&row)
                    .on_conflict((
                        exchange_rates::from_currency,
                        exchange_rates::to_currency,
                        exchange_rates::date,
                    ))
                    .do_update()
                    .set((
                        exchange_rates::rate.eq(&row.rate),
                        exchange_rates::created_at.eq(row.created_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                let stored = exchange_rates::table
                    .filter(exchange_rates::from_currency.eq(&row.from_currency))
                    .filter(exchange_rates::to_currency.eq(&row.to_currency))
                    .filter(exchange_rates::date.eq(row.date))
                    .select(ExchangeRateDB::as_select())
                    .first::<ExchangeRateDB>(conn)
                    .into_core()?;
                ExchangeRate::try_from(stored)
            })
            .await
    }
}

use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

use ledgerly_core::currencies::{UserCurrency, UserCurrencyRepositoryTrait};
use ledgerly_core::errors::Result;

use super::model::UserCurrencyDB;
use crate::db::get_connection;
use crate::errors::IntoCore;
use crate::schema::users_currencies;

pub struct UserCurrencyRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl UserCurrencyRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl UserCurrencyRepositoryTrait for UserCurrencyRepository {
    fn get_base_currency(&self, user_id: &str) -> Result<Option<UserCurrency>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users_currencies::table
            .filter(users_currencies::user_id.eq(user_id))
            .filter(users_currencies::is_default_currency.eq(true))
            .select(UserCurrencyDB::as_select())
            .first::<UserCurrencyDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(UserCurrency::from))
    }

    fn list_user_currencies(&self, user_id: &str) -> Result<Vec<UserCurrency>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users_currencies::table
            .filter(users_currencies::user_id.eq(user_id))
            .order(users_currencies::currency_code.asc())
            .select(UserCurrencyDB::as_select())
            .load::<UserCurrencyDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(UserCurrency::from).collect())
    }
}

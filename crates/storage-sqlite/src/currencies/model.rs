use chrono::NaiveDateTime;
use diesel::prelude::*;

use ledgerly_core::currencies::UserCurrency;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users_currencies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserCurrencyDB {
    pub id: String,
    pub user_id: String,
    pub currency_code: String,
    pub is_default_currency: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserCurrencyDB> for UserCurrency {
    fn from(db: UserCurrencyDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            currency_code: db.currency_code,
            is_default_currency: db.is_default_currency,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A currency in a user's set. At most one row per user is the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCurrency {
    pub id: String,
    pub user_id: String,
    pub currency_code: String,
    pub is_default_currency: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

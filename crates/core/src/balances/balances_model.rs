use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Balance of an account on a given day, in minor units of the user's base
/// currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceAmountUpdate {
    pub id: String,
    pub amount: i64,
}

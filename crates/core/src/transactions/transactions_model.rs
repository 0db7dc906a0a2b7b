use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                other
            ))
            .into()),
        }
    }
}

/// Ledger transaction. Amounts are unsigned minor units; direction comes from
/// `transaction_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub currency_code: String,
    pub commission_rate: i64,
    pub ref_amount: i64,
    pub ref_commission_rate: i64,
    pub ref_currency_code: String,
    pub time: NaiveDateTime,
}

impl Transaction {
    /// Ref amount signed by direction: income adds, expense subtracts.
    pub fn signed_ref_amount(&self) -> i64 {
        match self.transaction_type {
            TransactionType::Income => self.ref_amount,
            TransactionType::Expense => -self.ref_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRefUpdate {
    pub id: String,
    pub ref_amount: i64,
    pub ref_commission_rate: i64,
    pub ref_currency_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}

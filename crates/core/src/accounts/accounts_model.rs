//! Account domain models.

use serde::{Deserialize, Serialize};

use super::accounts_constants::is_system_account_type;

/// Account with native balances (minor units of `currency_code`) and their
/// base-currency counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub currency_code: String,
    pub initial_balance: i64,
    pub current_balance: i64,
    pub credit_limit: i64,
    pub ref_initial_balance: i64,
    pub ref_current_balance: i64,
    pub ref_credit_limit: i64,
}

impl Account {
    pub fn is_system(&self) -> bool {
        is_system_account_type(&self.account_type)
    }
}

/// Recomputed base-currency fields of one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRefUpdate {
    pub id: String,
    pub ref_initial_balance: i64,
    pub ref_current_balance: i64,
    pub ref_credit_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_type_is_case_insensitive() {
        let mut account = Account {
            id: "a".to_string(),
            user_id: "u".to_string(),
            name: "Wallet".to_string(),
            account_type: "SYSTEM".to_string(),
            currency_code: "EUR".to_string(),
            initial_balance: 0,
            current_balance: 0,
            credit_limit: 0,
            ref_initial_balance: 0,
            ref_current_balance: 0,
            ref_credit_limit: 0,
        };
        assert!(account.is_system());

        account.account_type = "bank".to_string();
        assert!(!account.is_system());
    }
}

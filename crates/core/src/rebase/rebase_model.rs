use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REBASE_LOCK_TTL;
use crate::errors::{Result, ValidationError};

/// Request to change a user's base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaseRequest {
    pub user_id: String,
    pub new_currency_code: String,
}

impl RebaseRequest {
    pub fn new(user_id: impl Into<String>, new_currency_code: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            new_currency_code: new_currency_code.into(),
        }
    }

    /// Trims both fields and upper-cases the currency code.
    pub fn normalized(self) -> Result<Self> {
        let user_id = self.user_id.trim().to_string();
        let new_currency_code = self.new_currency_code.trim().to_uppercase();

        if user_id.is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        if new_currency_code.is_empty() {
            return Err(ValidationError::MissingField("newCurrencyCode".to_string()).into());
        }
        Ok(Self {
            user_id,
            new_currency_code,
        })
    }
}

/// Rows touched per entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaseSummary {
    pub transactions_updated: usize,
    pub accounts_updated: usize,
    pub balances_rebuilt: usize,
    pub investment_transactions_updated: usize,
    pub portfolio_transfers_updated: usize,
    pub holdings_updated: usize,
    pub portfolio_balances_updated: usize,
}

impl RebaseSummary {
    pub fn total(&self) -> usize {
        self.transactions_updated
            + self.accounts_updated
            + self.balances_rebuilt
            + self.investment_transactions_updated
            + self.portfolio_transfers_updated
            + self.holdings_updated
            + self.portfolio_balances_updated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseStage {
    Idle,
    Validating,
    PlanningRates,
    Recalculating,
    FlippingFlag,
    InvalidatingCache,
    Done,
    Failed,
}

impl fmt::Display for RebaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RebaseStage::Idle => "idle",
            RebaseStage::Validating => "validating",
            RebaseStage::PlanningRates => "planning rates",
            RebaseStage::Recalculating => "recalculating",
            RebaseStage::FlippingFlag => "flipping base flag",
            RebaseStage::InvalidatingCache => "invalidating cache",
            RebaseStage::Done => "done",
            RebaseStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct RebaseConfig {
    /// Upper bound on how long a crashed holder can block the user.
    pub lock_ttl: Duration,
}

impl Default for RebaseConfig {
    fn default() -> Self {
        Self {
            lock_ttl: DEFAULT_REBASE_LOCK_TTL,
        }
    }
}

/// Inputs shared by every recalculator of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseContext {
    pub user_id: String,
    pub old_base: String,
    pub new_base: String,
    /// Rate date for "current value" fields, captured once per run.
    pub today: NaiveDate,
}

impl RebaseContext {
    pub fn new(
        user_id: impl Into<String>,
        old_base: impl Into<String>,
        new_base: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            old_base: old_base.into(),
            new_base: new_base.into(),
            today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_normalized() {
        let request = RebaseRequest::new(" 7 ", " usd").normalized().unwrap();
        assert_eq!(request.user_id, "7");
        assert_eq!(request.new_currency_code, "USD");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        assert!(RebaseRequest::new("", "USD").normalized().is_err());
        assert!(RebaseRequest::new("7", "  ").normalized().is_err());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = RebaseSummary {
            transactions_updated: 3,
            ..Default::default()
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["transactionsUpdated"], 3);
        assert_eq!(json["portfolioBalancesUpdated"], 0);
    }
}

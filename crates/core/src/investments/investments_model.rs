//! Investment domain models.
//!
//! All amounts are decimals at scale 10 in the row's `currency_code`; `ref_*`
//! fields hold the same amounts in the user's base currency.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub currency_code: String,
    pub amount: Decimal,
    pub fees: Decimal,
    pub price: Decimal,
    pub ref_amount: Decimal,
    pub ref_fees: Decimal,
    pub ref_price: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentTransactionRefUpdate {
    pub id: String,
    pub ref_amount: Decimal,
    pub ref_fees: Decimal,
    pub ref_price: Decimal,
}

/// Cash moved between two portfolios. Either side may be outside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransfer {
    pub id: String,
    pub from_portfolio_id: Option<String>,
    pub to_portfolio_id: Option<String>,
    pub currency_code: String,
    pub amount: Decimal,
    pub ref_amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioTransferRefUpdate {
    pub id: String,
    pub ref_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub currency_code: String,
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub ref_cost_basis: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingRefUpdate {
    pub id: String,
    pub ref_cost_basis: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBalance {
    pub id: String,
    pub portfolio_id: String,
    pub currency_code: String,
    pub available_cash: Decimal,
    pub total_cash: Decimal,
    pub ref_available_cash: Decimal,
    pub ref_total_cash: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioBalanceRefUpdate {
    pub id: String,
    pub ref_available_cash: Decimal,
    pub ref_total_cash: Decimal,
}

//! Database models for the ledger tables.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use ledgerly_core::accounts::Account;
use ledgerly_core::balances::Balance;
use ledgerly_core::errors::{Error, Result};
use ledgerly_core::investments::{Holding, InvestmentTransaction, PortfolioBalance, PortfolioTransfer};
use ledgerly_core::transactions::Transaction;

use crate::utils::{format_decimal, parse_decimal};

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: i64,
    pub currency_code: String,
    pub commission_rate: i64,
    pub ref_amount: i64,
    pub ref_commission_rate: i64,
    pub ref_currency_code: String,
    pub time: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            transaction_type: db.transaction_type.parse()?,
            id: db.id,
            user_id: db.user_id,
            account_id: db.account_id,
            amount: db.amount,
            currency_code: db.currency_code,
            commission_rate: db.commission_rate,
            ref_amount: db.ref_amount,
            ref_commission_rate: db.ref_commission_rate,
            ref_currency_code: db.ref_currency_code,
            time: db.time,
        })
    }
}

impl From<&Transaction> for TransactionDB {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            user_id: t.user_id.clone(),
            account_id: t.account_id.clone(),
            transaction_type: t.transaction_type.as_str().to_string(),
            amount: t.amount,
            currency_code: t.currency_code.clone(),
            commission_rate: t.commission_rate,
            ref_amount: t.ref_amount,
            ref_commission_rate: t.ref_commission_rate,
            ref_currency_code: t.ref_currency_code.clone(),
            time: t.time,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
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

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            account_type: db.account_type,
            currency_code: db.currency_code,
            initial_balance: db.initial_balance,
            current_balance: db.current_balance,
            credit_limit: db.credit_limit,
            ref_initial_balance: db.ref_initial_balance,
            ref_current_balance: db.ref_current_balance,
            ref_credit_limit: db.ref_credit_limit,
        }
    }
}

impl From<&Account> for AccountDB {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.clone(),
            user_id: a.user_id.clone(),
            name: a.name.clone(),
            account_type: a.account_type.clone(),
            currency_code: a.currency_code.clone(),
            initial_balance: a.initial_balance,
            current_balance: a.current_balance,
            credit_limit: a.credit_limit,
            ref_initial_balance: a.ref_initial_balance,
            ref_current_balance: a.ref_current_balance,
            ref_credit_limit: a.ref_credit_limit,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceDB {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: i64,
}

impl From<BalanceDB> for Balance {
    fn from(db: BalanceDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            date: db.date,
            amount: db.amount,
        }
    }
}

impl From<&Balance> for BalanceDB {
    fn from(b: &Balance) -> Self {
        Self {
            id: b.id.clone(),
            account_id: b.account_id.clone(),
            date: b.date,
            amount: b.amount,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentTransactionDB {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub currency_code: String,
    pub amount: String,
    pub fees: String,
    pub price: String,
    pub ref_amount: String,
    pub ref_fees: String,
    pub ref_price: String,
    pub date: NaiveDate,
}

impl TryFrom<InvestmentTransactionDB> for InvestmentTransaction {
    type Error = Error;

    fn try_from(db: InvestmentTransactionDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "investment_transactions.amount")?,
            fees: parse_decimal(&db.fees, "investment_transactions.fees")?,
            price: parse_decimal(&db.price, "investment_transactions.price")?,
            ref_amount: parse_decimal(&db.ref_amount, "investment_transactions.ref_amount")?,
            ref_fees: parse_decimal(&db.ref_fees, "investment_transactions.ref_fees")?,
            ref_price: parse_decimal(&db.ref_price, "investment_transactions.ref_price")?,
            id: db.id,
            portfolio_id: db.portfolio_id,
            symbol: db.symbol,
            currency_code: db.currency_code,
            date: db.date,
        })
    }
}

impl From<&InvestmentTransaction> for InvestmentTransactionDB {
    fn from(t: &InvestmentTransaction) -> Self {
        Self {
            id: t.id.clone(),
            portfolio_id: t.portfolio_id.clone(),
            symbol: t.symbol.clone(),
            currency_code: t.currency_code.clone(),
            amount: format_decimal(&t.amount),
            fees: format_decimal(&t.fees),
            price: format_decimal(&t.price),
            ref_amount: format_decimal(&t.ref_amount),
            ref_fees: format_decimal(&t.ref_fees),
            ref_price: format_decimal(&t.ref_price),
            date: t.date,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioTransferDB {
    pub id: String,
    pub from_portfolio_id: Option<String>,
    pub to_portfolio_id: Option<String>,
    pub currency_code: String,
    pub amount: String,
    pub ref_amount: String,
    pub date: NaiveDate,
}

impl TryFrom<PortfolioTransferDB> for PortfolioTransfer {
    type Error = Error;

    fn try_from(db: PortfolioTransferDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "portfolio_transfers.amount")?,
            ref_amount: parse_decimal(&db.ref_amount, "portfolio_transfers.ref_amount")?,
            id: db.id,
            from_portfolio_id: db.from_portfolio_id,
            to_portfolio_id: db.to_portfolio_id,
            currency_code: db.currency_code,
            date: db.date,
        })
    }
}

impl From<&PortfolioTransfer> for PortfolioTransferDB {
    fn from(t: &PortfolioTransfer) -> Self {
        Self {
            id: t.id.clone(),
            from_portfolio_id: t.from_portfolio_id.clone(),
            to_portfolio_id: t.to_portfolio_id.clone(),
            currency_code: t.currency_code.clone(),
            amount: format_decimal(&t.amount),
            ref_amount: format_decimal(&t.ref_amount),
            date: t.date,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub currency_code: String,
    pub quantity: String,
    pub cost_basis: String,
    pub ref_cost_basis: String,
}

impl TryFrom<HoldingDB> for Holding {
    type Error = Error;

    fn try_from(db: HoldingDB) -> Result<Self> {
        Ok(Self {
            quantity: parse_decimal(&db.quantity, "holdings.quantity")?,
            cost_basis: parse_decimal(&db.cost_basis, "holdings.cost_basis")?,
            ref_cost_basis: parse_decimal(&db.ref_cost_basis, "holdings.ref_cost_basis")?,
            id: db.id,
            portfolio_id: db.portfolio_id,
            symbol: db.symbol,
            currency_code: db.currency_code,
        })
    }
}

impl From<&Holding> for HoldingDB {
    fn from(h: &Holding) -> Self {
        Self {
            id: h.id.clone(),
            portfolio_id: h.portfolio_id.clone(),
            symbol: h.symbol.clone(),
            currency_code: h.currency_code.clone(),
            quantity: format_decimal(&h.quantity),
            cost_basis: format_decimal(&h.cost_basis),
            ref_cost_basis: format_decimal(&h.ref_cost_basis),
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioBalanceDB {
    pub id: String,
    pub portfolio_id: String,
    pub currency_code: String,
    pub available_cash: String,
    pub total_cash: String,
    pub ref_available_cash: String,
    pub ref_total_cash: String,
}

impl TryFrom<PortfolioBalanceDB> for PortfolioBalance {
    type Error = Error;

    fn try_from(db: PortfolioBalanceDB) -> Result<Self> {
        Ok(Self {
            available_cash: parse_decimal(&db.available_cash, "portfolio_balances.available_cash")?,
            total_cash: parse_decimal(&db.total_cash, "portfolio_balances.total_cash")?,
            ref_available_cash: parse_decimal(
                &db.ref_available_cash,
                "portfolio_balances.ref_available_cash",
            )?,
            ref_total_cash: parse_decimal(&db.ref_total_cash, "portfolio_balances.ref_total_cash")?,
            id: db.id,
            portfolio_id: db.portfolio_id,
            currency_code: db.currency_code,
        })
    }
}

impl From<&PortfolioBalance> for PortfolioBalanceDB {
    fn from(b: &PortfolioBalance) -> Self {
        Self {
            id: b.id.clone(),
            portfolio_id: b.portfolio_id.clone(),
            currency_code: b.currency_code.clone(),
            available_cash: format_decimal(&b.available_cash),
            total_cash: format_decimal(&b.total_cash),
            ref_available_cash: format_decimal(&b.ref_available_cash),
            ref_total_cash: format_decimal(&b.ref_total_cash),
        }
    }
}

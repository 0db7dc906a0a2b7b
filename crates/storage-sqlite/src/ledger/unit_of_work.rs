use std::collections::BTreeMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use ledgerly_core::accounts::{Account, AccountRefUpdate};
use ledgerly_core::balances::{Balance, BalanceAmountUpdate};
use ledgerly_core::errors::Result;
use ledgerly_core::investments::{
    Holding, HoldingRefUpdate, InvestmentTransaction, InvestmentTransactionRefUpdate,
    PortfolioBalance, PortfolioBalanceRefUpdate, PortfolioTransfer, PortfolioTransferRefUpdate,
};
use ledgerly_core::rebase::LedgerUnitOfWork;
use ledgerly_core::transactions::{Transaction, TransactionRefUpdate};

use super::model::{
    AccountDB, BalanceDB, HoldingDB, InvestmentTransactionDB, PortfolioBalanceDB,
    PortfolioTransferDB, TransactionDB,
};
use crate::currencies::UserCurrencyDB;
use crate::errors::IntoCore;
use crate::schema::{
    accounts, balances, holdings, investment_transactions, portfolio_balances,
    portfolio_transfers, portfolios, transactions, users_currencies,
};
use crate::utils::{chunk_for_sqlite, format_decimal};

/// [`LedgerUnitOfWork`] over one borrowed connection. Whatever transaction the
/// connection is in when the unit of work is created scopes every call.
pub struct SqliteUnitOfWork<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteUnitOfWork<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl LedgerUnitOfWork for SqliteUnitOfWork<'_> {
    fn list_transactions(&mut self, user_id: &str) -> Result<Vec<Transaction>> {
        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::time.asc(), transactions::id.asc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(self.conn)
            .into_core()?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    fn list_account_transactions(&mut self, account_id: &str) -> Result<Vec<Transaction>> {
        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .order((transactions::time.asc(), transactions::id.asc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(self.conn)
            .into_core()?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    fn save_transaction_refs(&mut self, updates: &[TransactionRefUpdate]) -> Result<()> {
        for update in updates {
            diesel::update(transactions::table.find(&update.id))
                .set((
                    transactions::ref_amount.eq(update.ref_amount),
                    transactions::ref_commission_rate.eq(update.ref_commission_rate),
                    transactions::ref_currency_code.eq(&update.ref_currency_code),
                ))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_accounts(&mut self, user_id: &str) -> Result<Vec<Account>> {
        let rows = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .order(accounts::id.asc())
            .select(AccountDB::as_select())
            .load::<AccountDB>(self.conn)
            .into_core()?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    fn save_account_refs(&mut self, updates: &[AccountRefUpdate]) -> Result<()> {
        for update in updates {
            diesel::update(accounts::table.find(&update.id))
                .set((
                    accounts::ref_initial_balance.eq(update.ref_initial_balance),
                    accounts::ref_current_balance.eq(update.ref_current_balance),
                    accounts::ref_credit_limit.eq(update.ref_credit_limit),
                ))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_balances(&mut self, account_id: &str) -> Result<Vec<Balance>> {
        let rows = balances::table
            .filter(balances::account_id.eq(account_id))
            .order((balances::date.asc(), balances::id.asc()))
            .select(BalanceDB::as_select())
            .load::<BalanceDB>(self.conn)
            .into_core()?;
        Ok(rows.into_iter().map(Balance::from).collect())
    }

    fn save_balance_amounts(&mut self, updates: &[BalanceAmountUpdate]) -> Result<()> {
        for update in updates {
            diesel::update(balances::table.find(&update.id))
                .set(balances::amount.eq(update.amount))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_portfolio_ids(&mut self, user_id: &str) -> Result<Vec<String>> {
        portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .order(portfolios::id.asc())
            .select(portfolios::id)
            .load::<String>(self.conn)
            .into_core()
    }

    fn list_investment_transactions(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<InvestmentTransaction>> {
        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(portfolio_ids) {
            rows.extend(
                investment_transactions::table
                    .filter(investment_transactions::portfolio_id.eq_any(chunk))
                    .order(investment_transactions::id.asc())
                    .select(InvestmentTransactionDB::as_select())
                    .load::<InvestmentTransactionDB>(self.conn)
                    .into_core()?,
            );
        }
        rows.into_iter().map(InvestmentTransaction::try_from).collect()
    }

    fn save_investment_transaction_refs(
        &mut self,
        updates: &[InvestmentTransactionRefUpdate],
    ) -> Result<()> {
        for update in updates {
            diesel::update(investment_transactions::table.find(&update.id))
                .set((
                    investment_transactions::ref_amount.eq(format_decimal(&update.ref_amount)),
                    investment_transactions::ref_fees.eq(format_decimal(&update.ref_fees)),
                    investment_transactions::ref_price.eq(format_decimal(&update.ref_price)),
                ))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_portfolio_transfers(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioTransfer>> {
        // A transfer between two portfolios of different chunks shows up twice.
        let mut by_id = BTreeMap::new();
        for chunk in chunk_for_sqlite(portfolio_ids) {
            let rows = portfolio_transfers::table
                .filter(
                    portfolio_transfers::from_portfolio_id
                        .eq_any(chunk)
                        .or(portfolio_transfers::to_portfolio_id.eq_any(chunk)),
                )
                .select(PortfolioTransferDB::as_select())
                .load::<PortfolioTransferDB>(self.conn)
                .into_core()?;
            for row in rows {
                by_id.insert(row.id.clone(), row);
            }
        }
        by_id.into_values().map(PortfolioTransfer::try_from).collect()
    }

    fn save_portfolio_transfer_refs(
        &mut self,
        updates: &[PortfolioTransferRefUpdate],
    ) -> Result<()> {
        for update in updates {
            diesel::update(portfolio_transfers::table.find(&update.id))
                .set(portfolio_transfers::ref_amount.eq(format_decimal(&update.ref_amount)))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_holdings(&mut self, portfolio_ids: &[String]) -> Result<Vec<Holding>> {
        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(portfolio_ids) {
            rows.extend(
                holdings::table
                    .filter(holdings::portfolio_id.eq_any(chunk))
                    .order(holdings::id.asc())
                    .select(HoldingDB::as_select())
                    .load::<HoldingDB>(self.conn)
                    .into_core()?,
            );
        }
        rows.into_iter().map(Holding::try_from).collect()
    }

    fn save_holding_refs(&mut self, updates: &[HoldingRefUpdate]) -> Result<()> {
        for update in updates {
            diesel::update(holdings::table.find(&update.id))
                .set(holdings::ref_cost_basis.eq(format_decimal(&update.ref_cost_basis)))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn list_portfolio_balances(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioBalance>> {
        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(portfolio_ids) {
            rows.extend(
                portfolio_balances::table
                    .filter(portfolio_balances::portfolio_id.eq_any(chunk))
                    .order(portfolio_balances::id.asc())
                    .select(PortfolioBalanceDB::as_select())
                    .load::<PortfolioBalanceDB>(self.conn)
                    .into_core()?,
            );
        }
        rows.into_iter().map(PortfolioBalance::try_from).collect()
    }

    fn save_portfolio_balance_refs(
        &mut self,
        updates: &[PortfolioBalanceRefUpdate],
    ) -> Result<()> {
        for update in updates {
            diesel::update(portfolio_balances::table.find(&update.id))
                .set((
                    portfolio_balances::ref_available_cash
                        .eq(format_decimal(&update.ref_available_cash)),
                    portfolio_balances::ref_total_cash.eq(format_decimal(&update.ref_total_cash)),
                ))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }

    fn clear_default_currency(&mut self, user_id: &str) -> Result<()> {
        diesel::update(users_currencies::table.filter(users_currencies::user_id.eq(user_id)))
            .set((
                users_currencies::is_default_currency.eq(false),
                users_currencies::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }

    fn set_default_currency(&mut self, user_id: &str, currency_code: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        let updated = diesel::update(
            users_currencies::table
                .filter(users_currencies::user_id.eq(user_id))
                .filter(users_currencies::currency_code.eq(currency_code)),
        )
        .set((
            users_currencies::is_default_currency.eq(true),
            users_currencies::updated_at.eq(now),
        ))
        .execute(self.conn)
        .into_core()?;

        if updated == 0 {
            log::debug!(
                "Adding {} to the currency set of user {}",
                currency_code,
                user_id
            );
            let row = UserCurrencyDB {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                currency_code: currency_code.to_string(),
                is_default_currency: true,
                created_at: now,
                updated_at: now,
            };
            diesel::insert_into(users_currencies::table)
                .values(&row)
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }
}

use super::rebase_traits::LedgerUnitOfWork;
use crate::accounts::{Account, AccountRefUpdate};
use crate::balances::{Balance, BalanceAmountUpdate};
use crate::errors::Result;
use crate::investments::{
    Holding, HoldingRefUpdate, InvestmentTransaction, InvestmentTransactionRefUpdate,
    PortfolioBalance, PortfolioBalanceRefUpdate, PortfolioTransfer, PortfolioTransferRefUpdate,
};
use crate::transactions::{Transaction, TransactionRefUpdate};

/// Passes reads through and drops every write.
///
/// Lets the recalculators run unchanged while only collecting the rates they
/// would need.
pub struct DryRunUnitOfWork<'a> {
    inner: &'a mut dyn LedgerUnitOfWork,
    skipped_writes: usize,
}

impl<'a> DryRunUnitOfWork<'a> {
    pub fn new(inner: &'a mut dyn LedgerUnitOfWork) -> Self {
        Self {
            inner,
            skipped_writes: 0,
        }
    }

    /// Rows that would have been written.
    pub fn skipped_writes(&self) -> usize {
        self.skipped_writes
    }

    fn skip(&mut self, rows: usize) -> Result<()> {
        self.skipped_writes += rows;
        Ok(())
    }
}

impl LedgerUnitOfWork for DryRunUnitOfWork<'_> {
    fn list_transactions(&mut self, user_id: &str) -> Result<Vec<Transaction>> {
        self.inner.list_transactions(user_id)
    }

    fn list_account_transactions(&mut self, account_id: &str) -> Result<Vec<Transaction>> {
        self.inner.list_account_transactions(account_id)
    }

    fn save_transaction_refs(&mut self, updates: &[TransactionRefUpdate]) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_accounts(&mut self, user_id: &str) -> Result<Vec<Account>> {
        self.inner.list_accounts(user_id)
    }

    fn save_account_refs(&mut self, updates: &[AccountRefUpdate]) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_balances(&mut self, account_id: &str) -> Result<Vec<Balance>> {
        self.inner.list_balances(account_id)
    }

    fn save_balance_amounts(&mut self, updates: &[BalanceAmountUpdate]) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_portfolio_ids(&mut self, user_id: &str) -> Result<Vec<String>> {
        self.inner.list_portfolio_ids(user_id)
    }

    fn list_investment_transactions(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<InvestmentTransaction>> {
        self.inner.list_investment_transactions(portfolio_ids)
    }

    fn save_investment_transaction_refs(
        &mut self,
        updates: &[InvestmentTransactionRefUpdate],
    ) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_portfolio_transfers(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioTransfer>> {
        self.inner.list_portfolio_transfers(portfolio_ids)
    }

    fn save_portfolio_transfer_refs(
        &mut self,
        updates: &[PortfolioTransferRefUpdate],
    ) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_holdings(&mut self, portfolio_ids: &[String]) -> Result<Vec<Holding>> {
        self.inner.list_holdings(portfolio_ids)
    }

    fn save_holding_refs(&mut self, updates: &[HoldingRefUpdate]) -> Result<()> {
        self.skip(updates.len())
    }

    fn list_portfolio_balances(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioBalance>> {
        self.inner.list_portfolio_balances(portfolio_ids)
    }

    fn save_portfolio_balance_refs(
        &mut self,
        updates: &[PortfolioBalanceRefUpdate],
    ) -> Result<()> {
        self.skip(updates.len())
    }

    fn clear_default_currency(&mut self, _user_id: &str) -> Result<()> {
        Ok(())
    }

    fn set_default_currency(&mut self, _user_id: &str, _currency_code: &str) -> Result<()> {
        Ok(())
    }
}

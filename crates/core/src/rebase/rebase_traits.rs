use async_trait::async_trait;

use super::rebase_model::{RebaseRequest, RebaseSummary};
use crate::accounts::{Account, AccountRefUpdate};
use crate::balances::{Balance, BalanceAmountUpdate};
use crate::errors::Result;
use crate::fx::RatePlan;
use crate::investments::{
    Holding, HoldingRefUpdate, InvestmentTransaction, InvestmentTransactionRefUpdate,
    PortfolioBalance, PortfolioBalanceRefUpdate, PortfolioTransfer, PortfolioTransferRefUpdate,
};
use crate::transactions::{Transaction, TransactionRefUpdate};

/// Storage view handed to a ledger job. Every call made through one instance
/// belongs to the same database transaction.
///
/// `save_*` methods only touch ref fields (balances: the amount) and never
/// trigger side effects such as events or audit entries.
pub trait LedgerUnitOfWork {
    fn list_transactions(&mut self, user_id: &str) -> Result<Vec<Transaction>>;
    fn list_account_transactions(&mut self, account_id: &str) -> Result<Vec<Transaction>>;
    fn save_transaction_refs(&mut self, updates: &[TransactionRefUpdate]) -> Result<()>;

    fn list_accounts(&mut self, user_id: &str) -> Result<Vec<Account>>;
    fn save_account_refs(&mut self, updates: &[AccountRefUpdate]) -> Result<()>;

    /// Balance rows of an account, oldest first.
    fn list_balances(&mut self, account_id: &str) -> Result<Vec<Balance>>;
    fn save_balance_amounts(&mut self, updates: &[BalanceAmountUpdate]) -> Result<()>;

    fn list_portfolio_ids(&mut self, user_id: &str) -> Result<Vec<String>>;

    fn list_investment_transactions(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<InvestmentTransaction>>;
    fn save_investment_transaction_refs(
        &mut self,
        updates: &[InvestmentTransactionRefUpdate],
    ) -> Result<()>;

    /// Transfers with a portfolio of the list on either side.
    fn list_portfolio_transfers(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioTransfer>>;
    fn save_portfolio_transfer_refs(
        &mut self,
        updates: &[PortfolioTransferRefUpdate],
    ) -> Result<()>;

    fn list_holdings(&mut self, portfolio_ids: &[String]) -> Result<Vec<Holding>>;
    fn save_holding_refs(&mut self, updates: &[HoldingRefUpdate]) -> Result<()>;

    fn list_portfolio_balances(
        &mut self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioBalance>>;
    fn save_portfolio_balance_refs(
        &mut self,
        updates: &[PortfolioBalanceRefUpdate],
    ) -> Result<()>;

    /// Clears the base flag on every currency of the user.
    fn clear_default_currency(&mut self, user_id: &str) -> Result<()>;

    /// Flags `currency_code` as base, adding it to the user's set when absent.
    fn set_default_currency(&mut self, user_id: &str, currency_code: &str) -> Result<()>;
}

/// Work to run against a [`LedgerUnitOfWork`].
pub type LedgerJob<T> = Box<dyn FnOnce(&mut dyn LedgerUnitOfWork) -> Result<T> + Send>;

#[async_trait]
pub trait LedgerStoreTrait: Send + Sync {
    /// Runs a job over a consistent read view. Nothing it writes is kept.
    async fn plan(&self, job: LedgerJob<RatePlan>) -> Result<RatePlan>;

    /// Runs a job inside one write transaction, committing only on `Ok`.
    /// On failure the job's own error is returned.
    async fn run_atomically(&self, job: LedgerJob<RebaseSummary>) -> Result<RebaseSummary>;
}

#[async_trait]
pub trait RebaseServiceTrait: Send + Sync {
    async fn change_base_currency(&self, request: RebaseRequest) -> Result<RebaseSummary>;
}

//! Rebase module - changes a user's base currency and recomputes every ref
//! amount they own in one unit of work.

mod dry_run;
mod investment_recalculators;
mod ledger_recalculators;
mod rebase_model;
mod rebase_service;
mod rebase_traits;
mod recalculators;


pub use dry_run::DryRunUnitOfWork;
pub use investment_recalculators::{
    recalculate_holdings, recalculate_investment_transactions, recalculate_portfolio_balances,
    recalculate_portfolio_transfers,
};
pub use ledger_recalculators::{
    recalculate_accounts, recalculate_balances, recalculate_transactions,
};
pub use rebase_model::{RebaseConfig, RebaseContext, RebaseRequest, RebaseStage, RebaseSummary};
pub use rebase_service::RebaseService;
pub use rebase_traits::{LedgerJob, LedgerStoreTrait, LedgerUnitOfWork, RebaseServiceTrait};
pub use recalculators::run_recalculators;

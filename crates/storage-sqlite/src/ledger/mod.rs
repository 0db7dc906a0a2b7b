//! Ledger storage: the unit of work and store used by base currency changes.

mod model;
mod store;
mod unit_of_work;

pub use model::{
    AccountDB, BalanceDB, HoldingDB, InvestmentTransactionDB, PortfolioBalanceDB, PortfolioDB,
    PortfolioTransferDB, TransactionDB,
};
pub use store::SqliteLedgerStore;
pub use unit_of_work::SqliteUnitOfWork;

#[cfg(test)]
mod ledger_tests;

use std::sync::Arc;

use async_trait::async_trait;
use diesel::connection::Connection;
use diesel::result::Error as DieselError;

use ledgerly_core::errors::{Error, Result};
use ledgerly_core::fx::RatePlan;
use ledgerly_core::rebase::{LedgerJob, LedgerStoreTrait, RebaseSummary};

use super::unit_of_work::SqliteUnitOfWork;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;

/// Runs ledger jobs against SQLite.
///
/// Planning reads on a pooled connection; the rebase itself goes through the
/// single writer so it holds the database write lock for its whole run.
pub struct SqliteLedgerStore {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteLedgerStore {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LedgerStoreTrait for SqliteLedgerStore {
    async fn plan(&self, job: LedgerJob<RatePlan>) -> Result<RatePlan> {
        let mut conn = get_connection(&self.pool)?;

        let mut outcome: Option<Result<RatePlan>> = None;
        let tx = conn.transaction::<(), DieselError, _>(|c| {
            let mut uow = SqliteUnitOfWork::new(c);
            outcome = Some(job(&mut uow));
            Err(DieselError::RollbackTransaction)
        });
        match tx {
            Ok(()) | Err(DieselError::RollbackTransaction) => {}
            Err(e) => return Err(StorageError::from(e).into()),
        }

        outcome.unwrap_or_else(|| {
            Err(Error::Unexpected(
                "Planning transaction finished without running its job".to_string(),
            ))
        })
    }

    async fn run_atomically(&self, job: LedgerJob<RebaseSummary>) -> Result<RebaseSummary> {
        self.writer
            .exec(move |conn| {
                let mut uow = SqliteUnitOfWork::new(conn);
                job(&mut uow)
            })
            .await
    }
}

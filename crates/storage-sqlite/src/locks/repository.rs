use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use ledgerly_core::errors::{Error, Result};
use ledgerly_core::locks::{LockProviderTrait, LockToken};

use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::schema::distributed_locks;

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::distributed_locks)]
struct LockRowDB {
    lock_key: String,
    token: String,
    expires_at: chrono::NaiveDateTime,
}

/// Leases stored in `distributed_locks`. Acquire and release run through the
/// writer, so each is one IMMEDIATE transaction.
#[derive(Clone)]
pub struct SqliteLockProvider {
    writer: WriteHandle,
}

impl SqliteLockProvider {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl LockProviderTrait for SqliteLockProvider {
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<Option<LockToken>> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| Error::Unexpected(format!("Lock TTL out of range: {}", e)))?;
        let key = key.to_string();

        self.writer
            .exec(move |conn| {
                let now = Utc::now();
                diesel::delete(
                    distributed_locks::table
                        .filter(distributed_locks::lock_key.eq(&key))
                        .filter(distributed_locks::expires_at.le(now.naive_utc())),
                )
                .execute(conn)
                .into_core()?;

                let token = LockToken::new(key.clone(), now + ttl);
                let inserted = diesel::insert_or_ignore_into(distributed_locks::table)
                    .values(LockRowDB {
                        lock_key: token.key.clone(),
                        token: token.token.clone(),
                        expires_at: token.expires_at.naive_utc(),
                    })
                    .execute(conn)
                    .into_core()?;

                Ok((inserted == 1).then_some(token))
            })
            .await
    }

    async fn release(&self, token: &LockToken) -> Result<bool> {
        let key = token.key.clone();
        let value = token.token.clone();

        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    distributed_locks::table
                        .filter(distributed_locks::lock_key.eq(&key))
                        .filter(distributed_locks::token.eq(&value)),
                )
                .execute(conn)
                .into_core()?;
                Ok(deleted > 0)
            })
            .await
    }
}

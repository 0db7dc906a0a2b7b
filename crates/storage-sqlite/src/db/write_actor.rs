use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use ledgerly_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

fn writer_unavailable(detail: &str) -> Error {
    Error::Database(DatabaseError::ConnectionFailed(format!(
        "Database writer unavailable: {}",
        detail
    )))
}

impl WriteHandle {
    /// Executes `job` on the writer's dedicated connection inside an
    /// IMMEDIATE transaction. The transaction commits only when the job
    /// returns `Ok`; otherwise the job's own error is returned.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_unavailable("actor stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_unavailable("reply dropped"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("Writer returned a value of the wrong type".to_string()))
    }
}

/// Spawns the single writer task. It owns one pooled connection and runs
/// write jobs one at a time.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                let detail = e.to_string();
                log::error!("Writer actor could not get a database connection: {}", detail);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(writer_unavailable(&detail)));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

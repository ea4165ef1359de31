//! Dedicated writer thread. All mutations funnel through one connection and
//! each submitted job runs inside its own `BEGIN IMMEDIATE` transaction.
//!
//! Serializing writers this way gives every job all-or-nothing semantics and
//! keeps overlapping catalog sync runs from interleaving their upserts: two
//! concurrent runs execute back-to-back, never mixed.

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use holocron_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

type WriteJob = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Handle for submitting write jobs to the writer thread.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<WriteJob>,
}

/// Transaction-internal error carrier: either an application error from the
/// job or a diesel error raised by the transaction machinery itself.
enum TxError {
    App(Error),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        TxError::Db(err)
    }
}

impl WriteHandle {
    /// Run one closure inside an immediate transaction on the writer
    /// connection. An `Err` return rolls every write of the closure back.
    pub async fn exec<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let boxed: WriteJob = Box::new(move |conn| {
            let outcome = conn
                .immediate_transaction::<T, TxError, _>(|tx_conn| {
                    job(tx_conn).map_err(TxError::App)
                })
                .map_err(|err| match err {
                    TxError::App(app) => app,
                    TxError::Db(db) => Error::from(StorageError::from(db)),
                });
            let _ = done_tx.send(outcome);
        });

        self.tx.send(boxed).map_err(|_| writer_gone())?;
        done_rx.await.map_err(|_| writer_gone())?
    }
}

fn writer_gone() -> Error {
    Error::Database(DatabaseError::Internal(
        "Database writer is not running".to_string(),
    ))
}

/// Spawn the writer thread for a pool. The thread holds one connection for
/// its lifetime and drains jobs until every handle is dropped.
pub fn spawn_writer(pool: Pool<ConnectionManager<SqliteConnection>>) -> WriteHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();

    std::thread::spawn(move || {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(err) => {
                error!("writer thread failed to acquire a connection: {err}");
                return;
            }
        };
        while let Some(job) = rx.blocking_recv() {
            job(&mut conn);
        }
    });

    WriteHandle { tx }
}

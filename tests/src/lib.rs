//! Shared support for the integration suite: fixture models, store wrappers,
//! and database constructors.

pub mod recording;

pub use fault::{FailPoint, FaultHandle, FaultStore};
pub use recording::{OpLog, RecordingStore, StoreOp};

use larder::Db;
use larder_store_sqlite::SqliteStore;

/// A database over a fresh in-memory SQLite store.
pub fn db() -> Db {
    Db::new(SqliteStore::in_memory().expect("in-memory store opens"))
}

/// A database whose store records every boundary call.
pub fn recording_db() -> (Db, OpLog) {
    let store = RecordingStore::new(SqliteStore::in_memory().expect("in-memory store opens"));
    let log = store.log();
    (Db::new(store), log)
}

/// A database whose store can be armed to fail at a chosen call.
pub fn faulty_db() -> (Db, FaultHandle) {
    let store = FaultStore::new(SqliteStore::in_memory().expect("in-memory store opens"));
    let handle = store.handle();
    (Db::new(store), handle)
}

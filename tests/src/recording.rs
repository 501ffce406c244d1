//! A store wrapper that records every boundary call, so tests can assert on
//! transaction bracketing, skipped row writes, and link replacement order.

use larder::store::{Link, LinkKey, Row, Store};
use larder::{Ident, Result};

use std::sync::{Arc, Mutex};

/// One recorded store boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    CreateTable { table: String },
    InsertRow { table: String },
    UpdateRow { table: String, ident: Ident },
    DeleteRow { table: String, ident: Ident },
    SelectRow { table: String, ident: Ident },
    SelectIdents { table: String },
    SelectLinks { key: LinkKey },
    InsertLink { key: LinkKey, target: Ident, ordinal: i64 },
    DeleteLinks { key: LinkKey },
    Begin,
    Commit,
    Rollback,
}

/// A store wrapper that logs all operations for testing purposes.
pub struct RecordingStore<S> {
    inner: S,
    log: Arc<Mutex<Vec<StoreOp>>>,
}

impl<S: Store> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded operations.
    pub fn log(&self) -> OpLog {
        OpLog {
            ops: self.log.clone(),
        }
    }

    fn record(&self, op: StoreOp) {
        self.log.lock().expect("ops log lock").push(op);
    }
}

impl<S: Store> Store for RecordingStore<S> {
    fn create_table(&mut self, table: &str, columns: &[&str]) -> Result<()> {
        self.record(StoreOp::CreateTable {
            table: table.to_string(),
        });
        self.inner.create_table(table, columns)
    }

    fn insert_row(&mut self, table: &str, row: &Row) -> Result<Ident> {
        self.record(StoreOp::InsertRow {
            table: table.to_string(),
        });
        self.inner.insert_row(table, row)
    }

    fn update_row(&mut self, table: &str, ident: Ident, row: &Row) -> Result<()> {
        self.record(StoreOp::UpdateRow {
            table: table.to_string(),
            ident,
        });
        self.inner.update_row(table, ident, row)
    }

    fn delete_row(&mut self, table: &str, ident: Ident) -> Result<()> {
        self.record(StoreOp::DeleteRow {
            table: table.to_string(),
            ident,
        });
        self.inner.delete_row(table, ident)
    }

    fn select_row(&mut self, table: &str, ident: Ident) -> Result<Option<Row>> {
        self.record(StoreOp::SelectRow {
            table: table.to_string(),
            ident,
        });
        self.inner.select_row(table, ident)
    }

    fn select_idents(&mut self, table: &str) -> Result<Vec<Ident>> {
        self.record(StoreOp::SelectIdents {
            table: table.to_string(),
        });
        self.inner.select_idents(table)
    }

    fn select_links(&mut self, key: &LinkKey) -> Result<Vec<Link>> {
        self.record(StoreOp::SelectLinks { key: key.clone() });
        self.inner.select_links(key)
    }

    fn insert_link(&mut self, key: &LinkKey, link: &Link) -> Result<()> {
        self.record(StoreOp::InsertLink {
            key: key.clone(),
            target: link.target,
            ordinal: link.ordinal,
        });
        self.inner.insert_link(key, link)
    }

    fn delete_links(&mut self, key: &LinkKey) -> Result<()> {
        self.record(StoreOp::DeleteLinks { key: key.clone() });
        self.inner.delete_links(key)
    }

    fn begin(&mut self) -> Result<()> {
        self.record(StoreOp::Begin);
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<()> {
        self.record(StoreOp::Commit);
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.record(StoreOp::Rollback);
        self.inner.rollback()
    }
}

/// A clean query API over the recorded operations.
#[derive(Clone)]
pub struct OpLog {
    ops: Arc<Mutex<Vec<StoreOp>>>,
}

impl OpLog {
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn snapshot(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&StoreOp) -> bool,
    {
        self.ops.lock().unwrap().iter().any(|op| predicate(op))
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&StoreOp) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(op))
            .count()
    }

    pub fn has_insert_row(&self) -> bool {
        self.any(|op| matches!(op, StoreOp::InsertRow { .. }))
    }

    pub fn has_update_row(&self) -> bool {
        self.any(|op| matches!(op, StoreOp::UpdateRow { .. }))
    }

    pub fn has_rollback(&self) -> bool {
        self.any(|op| matches!(op, StoreOp::Rollback))
    }

    /// Positions of the first matching op, if any.
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&StoreOp) -> bool,
    {
        self.ops.lock().unwrap().iter().position(|op| predicate(op))
    }
}

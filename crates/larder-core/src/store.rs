//! The row store boundary.
//!
//! The engine consumes durable key/row storage through this trait: row CRUD
//! by identity, link-record storage for relation collections, and an
//! explicit transaction scope. Every single call is atomic at the store's
//! discretion; multi-call sequences are wrapped by the engine in
//! `begin`/`commit`/`rollback`.

mod link;
pub use link::{Link, LinkKey};

use crate::{Ident, Result, Value};

use indexmap::IndexMap;

/// One stored row: column name to wire value, in schema column order.
pub type Row = IndexMap<String, Value>;

/// Synchronous row store collaborator.
pub trait Store {
    /// Creates the row table for a model if it does not exist. The identity
    /// column is the store's own concern and is not listed in `columns`.
    fn create_table(&mut self, table: &str, columns: &[&str]) -> Result<()>;

    /// Inserts a row and returns the store-allocated identity.
    fn insert_row(&mut self, table: &str, row: &Row) -> Result<Ident>;

    /// Updates an existing row in place.
    fn update_row(&mut self, table: &str, ident: Ident, row: &Row) -> Result<()>;

    /// Deletes a row. Deleting an absent row is not an error.
    fn delete_row(&mut self, table: &str, ident: Ident) -> Result<()>;

    /// Fetches a row by identity.
    fn select_row(&mut self, table: &str, ident: Ident) -> Result<Option<Row>>;

    /// All identities stored in a table, ascending.
    fn select_idents(&mut self, table: &str) -> Result<Vec<Ident>>;

    /// Link records owned by `(table, owner, field)`, ordered by ordinal
    /// ascending.
    fn select_links(&mut self, key: &LinkKey) -> Result<Vec<Link>>;

    /// Inserts one link record under the given owner key.
    fn insert_link(&mut self, key: &LinkKey, link: &Link) -> Result<()>;

    /// Deletes every link record owned by the given key.
    fn delete_links(&mut self, key: &LinkKey) -> Result<()>;

    /// Opens a transaction scope.
    fn begin(&mut self) -> Result<()>;

    /// Commits the open transaction scope.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the open transaction scope.
    fn rollback(&mut self) -> Result<()>;
}

use crate::engine::{load, load::LoadCx, save, save::SaveCx};
use crate::object::Object;

use larder_core::store::Store;
use larder_core::{Error, Ident, Model, Result};

use std::sync::Arc;
use tracing::{debug, error};

/// The persistence façade: coordinates the row mapper, the relation
/// resolver, and the store for save, load, and delete.
///
/// Every save and delete wraps its multi-call store sequence — the row write
/// plus its relation-link replacement — in one transaction scope, so a
/// failure mid-save rolls both back together. Loads run inside a scope as
/// well so eager relation loading observes one consistent snapshot.
pub struct Db {
    store: Box<dyn Store>,
}

impl Db {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Creates the row tables for the given models through the store
    /// boundary.
    pub fn push_schema(&mut self, models: &[&Arc<Model>]) -> Result<()> {
        for model in models {
            let columns: Vec<&str> = model.columns().map(|field| field.column.as_str()).collect();
            self.store.create_table(&model.table, &columns)?;
            debug!(model = %model.name, table = %model.table, "table created");
        }
        Ok(())
    }

    /// Saves an object and its object graph.
    ///
    /// Transient objects are inserted and adopt the store-allocated
    /// identity; persisted objects update in place (a clean object skips its
    /// row write). A failed save leaves both the store and the object's
    /// in-memory state untouched.
    pub fn save(&mut self, object: &mut Object) -> Result<()> {
        debug!(model = %object.model().name, ident = ?object.ident(), "save");
        let mut scope = TxScope::begin(&mut *self.store)?;
        let mut cx = SaveCx::default();
        save::save_object(scope.store(), object, &mut cx)?;
        scope.commit()
    }

    /// Loads one object by identity, relations and references eagerly
    /// materialized.
    pub fn load(&mut self, model: &Arc<Model>, ident: Ident) -> Result<Object> {
        debug!(model = %model.name, %ident, "load");
        let mut scope = TxScope::begin(&mut *self.store)?;
        let mut cx = LoadCx::default();
        let object = load::load_object(scope.store(), model, ident, &mut cx)?;
        scope.commit()?;
        Ok(object)
    }

    /// Loads every stored instance of a model, by ascending identity.
    pub fn load_all(&mut self, model: &Arc<Model>) -> Result<Vec<Object>> {
        let mut scope = TxScope::begin(&mut *self.store)?;
        let idents = scope.store().select_idents(&model.table)?;
        let mut objects = Vec::with_capacity(idents.len());
        for ident in idents {
            let mut cx = LoadCx::default();
            objects.push(load::load_object(scope.store(), model, ident, &mut cx)?);
        }
        scope.commit()?;
        Ok(objects)
    }

    /// Number of stored instances of a model.
    pub fn count(&mut self, model: &Arc<Model>) -> Result<usize> {
        Ok(self.store.select_idents(&model.table)?.len())
    }

    /// Deletes an object's row and the relation links it owns, transitioning
    /// it to the terminal Deleted state.
    ///
    /// Links *targeting* the object elsewhere are left behind; loading their
    /// owners afterwards surfaces dangling references rather than hiding
    /// them. Deleting a transient object only transitions its state.
    pub fn delete(&mut self, object: &mut Object) -> Result<()> {
        if object.is_deleted() {
            return Err(Error::use_after_delete(object.model().name.clone()));
        }

        if let Some(ident) = object.ident() {
            let model = object.model().clone();
            debug!(model = %model.name, %ident, "delete");

            let mut scope = TxScope::begin(&mut *self.store)?;
            for field in model.relations() {
                let key = larder_core::store::LinkKey::new(
                    model.table.clone(),
                    ident,
                    field.name.clone(),
                );
                scope.store().delete_links(&key)?;
            }
            scope.store().delete_row(&model.table, ident)?;
            scope.commit()?;
        }

        // In-memory state changes only after the store work committed.
        object.mark_deleted();
        Ok(())
    }

    /// Escape hatch to the store collaborator.
    pub fn store_mut(&mut self) -> &mut dyn Store {
        &mut *self.store
    }
}

/// Transaction scope that rolls back on drop unless committed.
struct TxScope<'a> {
    store: &'a mut dyn Store,
    committed: bool,
}

impl<'a> TxScope<'a> {
    fn begin(store: &'a mut dyn Store) -> Result<Self> {
        store.begin()?;
        Ok(Self {
            store,
            committed: false,
        })
    }

    fn store(&mut self) -> &mut dyn Store {
        &mut *self.store
    }

    fn commit(mut self) -> Result<()> {
        self.committed = true;
        self.store.commit()
    }
}

impl Drop for TxScope<'_> {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(err) = self.store.rollback() {
                error!(%err, "rollback failed");
            }
        }
    }
}

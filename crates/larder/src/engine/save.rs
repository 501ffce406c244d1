//! The save path: persist referenced objects, write the owner's row, then
//! replace its relation links.
//!
//! Link replacement is full replace-on-save: existing links for the
//! (owner, field) pair are deleted and one link per element inserted with
//! its position as ordinal. The whole recursion runs inside the caller's
//! transaction scope.

use crate::engine::row;
use crate::object::{Object, RefSlot, Slot};

use larder_core::store::{Link, LinkKey, Store};
use larder_core::{err, Error, Ident, Result};

use std::collections::HashSet;
use tracing::{debug, trace};

/// Identities currently being saved in this call chain. An identity already
/// in the set short-circuits: skip the re-save, still write the link. This
/// is the required cycle-breaking policy, not an optimization.
#[derive(Default)]
pub(crate) struct SaveCx {
    in_flight: HashSet<(String, Ident)>,
}

pub(crate) fn save_object(
    store: &mut dyn Store,
    object: &mut Object,
    cx: &mut SaveCx,
) -> Result<()> {
    if object.is_deleted() {
        return Err(Error::use_after_delete(object.model().name.clone()));
    }
    if let Some(ident) = object.ident() {
        if cx.in_flight.contains(&(object.model().table.clone(), ident)) {
            trace!(model = %object.model().name, %ident, "already saving, skip");
            return Ok(());
        }
    }

    // A failed save must leave identity, lifecycle, and dirty state exactly
    // as they were. Nested objects restore themselves before propagating.
    let marker = object.marker();
    let result = save_inner(store, object, cx);
    if result.is_err() {
        object.restore(marker);
    }
    result
}

fn save_inner(store: &mut dyn Store, object: &mut Object, cx: &mut SaveCx) -> Result<()> {
    let model = object.model().clone();

    // Referenced objects first, so the owner's row can carry their memos.
    for field in &model.fields {
        if let Slot::Ref(RefSlot::Loaded(_)) = object.slot(&field.name) {
            let Slot::Ref(RefSlot::Loaded(referenced)) = object.slot_mut(&field.name) else {
                unreachable!()
            };
            save_object(store, referenced, cx)
                .map_err(|err| err.context(err!("saving reference `{}`", field.name)))?;
        }
    }

    match object.ident() {
        None => {
            let row = row::to_row(&model, object)?;
            let ident = store.insert_row(&model.table, &row)?;
            debug!(model = %model.name, %ident, "inserted");
            object.set_persisted(ident);
        }
        Some(ident) => {
            if object.is_dirty() {
                let row = row::to_row(&model, object)?;
                store.update_row(&model.table, ident, &row)?;
                debug!(model = %model.name, %ident, "updated");
            } else {
                trace!(model = %model.name, %ident, "clean, row write skipped");
            }
            object.mark_clean();
        }
    }

    let ident = object
        .ident()
        .expect("identity assigned by the row write above");
    let key = (model.table.clone(), ident);
    cx.in_flight.insert(key.clone());
    let result = save_relations(store, object, ident, cx);
    cx.in_flight.remove(&key);
    result
}

fn save_relations(
    store: &mut dyn Store,
    object: &mut Object,
    ident: Ident,
    cx: &mut SaveCx,
) -> Result<()> {
    let model = object.model().clone();

    for field in model.relations() {
        // An unloaded slot never replaces links; the stored records are the
        // source of truth.
        if matches!(object.slot(&field.name), Slot::Related(None)) {
            continue;
        }

        {
            let Slot::Related(Some(elements)) = object.slot_mut(&field.name) else {
                unreachable!("relation field holds a non-collection slot")
            };
            for element in elements.iter_mut() {
                save_object(store, element, cx).map_err(|err| {
                    err.context(err!("saving element of relation `{}`", field.name))
                })?;
            }
        }

        let key = LinkKey::new(model.table.clone(), ident, field.name.clone());
        store.delete_links(&key)?;

        let Slot::Related(Some(elements)) = object.slot(&field.name) else {
            unreachable!()
        };
        for (ordinal, element) in elements.iter().enumerate() {
            let target = element
                .ident()
                .expect("relation element persisted by the save above");
            let link = Link {
                target_model: element.model().name.clone(),
                target,
                ordinal: ordinal as i64,
            };
            store.insert_link(&key, &link)?;
        }
        trace!(
            model = %model.name,
            %ident,
            field = %field.name,
            links = elements.len(),
            "links replaced"
        );
    }
    Ok(())
}

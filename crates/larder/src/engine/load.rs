//! The load path: fetch the row, decode it, then eagerly materialize object
//! references and relation collections.
//!
//! Loading is eager by policy: collections are fully materialized during the
//! owner's load call, trading extra reads for predictable latency and for
//! returning instances with no live tie to the store. A link or memo whose
//! target row is gone surfaces as a dangling reference, never as a silently
//! shortened collection.

use crate::engine::row;
use crate::object::{Object, RefSlot, Slot};

use larder_core::schema::registry;
use larder_core::store::{LinkKey, Store};
use larder_core::{err, Error, Ident, Model, Result};

use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Identities currently being loaded in this call chain. Meeting one again
/// materializes a *shallow* instance — scalar fields populated, relation
/// slots unloaded, references left as raw memos — so store-level cycles
/// terminate.
#[derive(Default)]
pub(crate) struct LoadCx {
    in_flight: HashSet<(String, Ident)>,
}

pub(crate) fn load_object(
    store: &mut dyn Store,
    model: &Arc<Model>,
    ident: Ident,
    cx: &mut LoadCx,
) -> Result<Object> {
    let row = store
        .select_row(&model.table, ident)?
        .ok_or_else(|| Error::not_found(format!("table={} id={}", model.table, ident)))?;

    let mut object = row::from_row(model, row)?;
    object.set_persisted(ident);

    let key = (model.table.clone(), ident);
    if cx.in_flight.contains(&key) {
        trace!(model = %model.name, %ident, "already loading, shallow instance");
        return Ok(object);
    }

    cx.in_flight.insert(key.clone());
    let result = materialize(store, &mut object, ident, cx);
    cx.in_flight.remove(&key);
    result?;

    Ok(object)
}

/// Resolves an object's reference memos and relation collections into live
/// instances.
fn materialize(
    store: &mut dyn Store,
    object: &mut Object,
    ident: Ident,
    cx: &mut LoadCx,
) -> Result<()> {
    let model = object.model().clone();

    for field in &model.fields {
        if let Slot::Ref(RefSlot::Memo(reference)) = object.slot(&field.name) {
            let reference = reference.clone();
            let target_model = registry::lookup(&reference.model)
                .ok_or_else(|| Error::unknown_model(reference.model.clone()))?;

            let referenced = match load_object(store, &target_model, reference.ident, cx) {
                Ok(referenced) => referenced,
                Err(err) if err.is_not_found() => {
                    return Err(Error::dangling_reference(format!(
                        "field `{}` of {} {} references missing {}",
                        field.name,
                        model.name,
                        ident,
                        reference.memo()
                    )))
                }
                Err(err) => return Err(err),
            };
            object.set_slot(&field.name, Slot::Ref(RefSlot::Loaded(Box::new(referenced))));
        }
    }

    for field in model.relations() {
        let key = LinkKey::new(model.table.clone(), ident, field.name.clone());
        let links = store.select_links(&key)?;

        let mut elements = Vec::with_capacity(links.len());
        for link in &links {
            let target_model = registry::lookup(&link.target_model)
                .ok_or_else(|| Error::unknown_model(link.target_model.clone()))?;

            let element = match load_object(store, &target_model, link.target, cx) {
                Ok(element) => element,
                Err(err) if err.is_not_found() => {
                    return Err(Error::dangling_reference(format!(
                        "relation `{}` of {} {} links to missing {}:{}",
                        field.name, model.name, ident, link.target_model, link.target
                    )))
                }
                Err(err) => {
                    return Err(err.context(err!("loading relation `{}`", field.name)))
                }
            };
            elements.push(element);
        }
        trace!(
            model = %model.name,
            %ident,
            field = %field.name,
            elements = elements.len(),
            "relation loaded"
        );
        object.set_slot(&field.name, Slot::Related(Some(elements)));
    }

    Ok(())
}

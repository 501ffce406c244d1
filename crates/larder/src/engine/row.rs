//! The row mapper: flattens one object into a column → wire value mapping
//! and back.
//!
//! Transient fields and relation collections produce no column. Unknown
//! columns in a stored row are ignored, so older code can read rows written
//! by a newer schema.

use crate::object::{Object, RefSlot, Slot};

use larder_core::schema::FieldKind;
use larder_core::store::Row;
use larder_core::{codec, err, Error, FieldValue, Model, ObjectRef, Result, Value};

use std::sync::Arc;

pub(crate) fn to_row(model: &Arc<Model>, object: &Object) -> Result<Row> {
    let mut row = Row::with_capacity(model.fields.len());
    for field in model.columns() {
        let value = match object.slot(&field.name) {
            Slot::Value(value) => codec::encode(value, &field.kind).map_err(|err| {
                err.context(err!("column `{}` of model `{}`", field.column, model.name))
            })?,
            Slot::Ref(RefSlot::Null) => Value::Null,
            Slot::Ref(RefSlot::Memo(reference)) => Value::Text(reference.memo()),
            Slot::Ref(RefSlot::Loaded(referenced)) => {
                // The save path persists referenced objects before mapping
                // the owner's row.
                let ident = referenced.ident().ok_or_else(|| {
                    err!(
                        "field `{}` references an unsaved `{}` instance",
                        field.name,
                        referenced.model().name
                    )
                })?;
                Value::Text(ObjectRef::new(referenced.model().name.clone(), ident).memo())
            }
            Slot::Related(_) => unreachable!("collection fields are not columns"),
        };
        row.insert(field.column.clone(), value);
    }
    Ok(row)
}

pub(crate) fn from_row(model: &Arc<Model>, mut row: Row) -> Result<Object> {
    let mut object = Object::new_unloaded(model);
    for field in model.columns() {
        let value = row
            .swap_remove(&field.column)
            .ok_or_else(|| Error::missing_column(field.column.clone()))
            .map_err(|err| err.context(err!("decoding row for model `{}`", model.name)))?;

        let decoded = codec::decode(value, &field.kind).map_err(|err| {
            err.context(err!("column `{}` of model `{}`", field.column, model.name))
        })?;

        let slot = match (&field.kind, decoded) {
            (FieldKind::ObjectRef, FieldValue::Null) => Slot::Ref(RefSlot::Null),
            // References stay raw memos here; the relation resolver decides
            // whether to materialize them.
            (FieldKind::ObjectRef, FieldValue::Ref(reference)) => Slot::Ref(RefSlot::Memo(reference)),
            (_, value) => Slot::Value(value),
        };
        object.set_slot(&field.name, slot);
    }
    Ok(object)
}

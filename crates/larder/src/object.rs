use larder_core::schema::FieldKind;
use larder_core::{err, Error, FieldValue, Ident, Model, ObjectRef, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// One in-memory persistent object: a slot per declared field plus identity
/// and lifecycle state.
///
/// Lifecycle runs Transient → Persisted → Deleted (terminal). Mutation is
/// allowed in any non-deleted state; nothing reaches storage until an
/// explicit [`Db::save`](crate::Db::save).
#[derive(Debug, Clone)]
pub struct Object {
    model: Arc<Model>,
    ident: Option<Ident>,
    state: State,
    dirty: bool,
    slots: IndexMap<String, Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Transient,
    Persisted,
    Deleted,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot {
    /// A scalar property value.
    Value(FieldValue),

    /// An object reference property.
    Ref(RefSlot),

    /// A collection of persistent objects. `None` means unloaded: the slot
    /// was not materialized (cycle-broken shallow load) and must not replace
    /// link records on save.
    Related(Option<Vec<Object>>),
}

#[derive(Debug, Clone)]
pub(crate) enum RefSlot {
    Null,

    /// Raw identity memo, not yet materialized into an instance. Written
    /// back verbatim on save.
    Memo(ObjectRef),

    /// A live instance.
    Loaded(Box<Object>),
}

/// Snapshot of identity, lifecycle, and dirty state for an object and every
/// object it owns, captured before a save so a failed save can put the whole
/// subtree back. Save never changes the slot structure, so the snapshot's
/// traversal order stays valid for restore.
#[derive(Debug, Clone)]
pub(crate) struct Marker {
    ident: Option<Ident>,
    state: State,
    dirty: bool,
    children: Vec<Marker>,
}

impl Object {
    /// Creates a fresh transient instance of a model. Every scalar slot
    /// starts `Null`; collection slots start loaded and empty.
    pub fn new(model: &Arc<Model>) -> Self {
        Self::with_slots(model, true)
    }

    /// Instance shell for the load path: attached relation slots start
    /// *unloaded* until the resolver materializes them.
    pub(crate) fn new_unloaded(model: &Arc<Model>) -> Self {
        Self::with_slots(model, false)
    }

    fn with_slots(model: &Arc<Model>, collections_loaded: bool) -> Self {
        let mut slots = IndexMap::with_capacity(model.fields.len());
        for field in &model.fields {
            let slot = match field.kind {
                FieldKind::ObjectRef => Slot::Ref(RefSlot::Null),
                // Detached collections are in-memory only; they are always
                // "loaded" and start empty.
                FieldKind::Related if field.relation && !collections_loaded => Slot::Related(None),
                FieldKind::Related => Slot::Related(Some(Vec::new())),
                _ => Slot::Value(FieldValue::Null),
            };
            slots.insert(field.name.clone(), slot);
        }
        Self {
            model: model.clone(),
            ident: None,
            state: State::Transient,
            dirty: false,
            slots,
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The primary-key identity, present once persisted.
    pub fn ident(&self) -> Option<Ident> {
        self.ident
    }

    pub fn is_transient(&self) -> bool {
        self.state == State::Transient
    }

    pub fn is_persisted(&self) -> bool {
        self.state == State::Persisted
    }

    pub fn is_deleted(&self) -> bool {
        self.state == State::Deleted
    }

    /// Returns `true` if a property changed since the last save or load.
    /// A clean persisted object skips its row write on save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets a scalar property. The value must fit the field's declared kind.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.check_mutable()?;
        let value = value.into();
        let declared = self.field(field)?;
        let kind = declared.kind.clone();

        match kind {
            FieldKind::Related => Err(err!(
                "field `{field}` is a relation collection; use set_related"
            )),
            FieldKind::ObjectRef => {
                let slot = match value {
                    FieldValue::Null => RefSlot::Null,
                    FieldValue::Ref(reference) => RefSlot::Memo(reference),
                    other => {
                        return Err(Error::unsupported_type(format!(
                            "field `{field}` holds an object reference, not {}",
                            other.shape_name()
                        )))
                    }
                };
                *self.slot_mut(field) = Slot::Ref(slot);
                self.dirty = true;
                Ok(())
            }
            kind => {
                if !kind.accepts(&value) {
                    return Err(Error::unsupported_type(format!(
                        "field `{field}` of kind {kind} cannot hold a {} value",
                        value.shape_name()
                    )));
                }
                *self.slot_mut(field) = Slot::Value(value);
                self.dirty = true;
                Ok(())
            }
        }
    }

    /// Reads a scalar property.
    pub fn get(&self, field: &str) -> Result<&FieldValue> {
        self.field(field)?;
        match &self.slots[field] {
            Slot::Value(value) => Ok(value),
            Slot::Ref(_) => Err(err!("field `{field}` holds an object reference; use object")),
            Slot::Related(_) => Err(err!(
                "field `{field}` is a collection of objects; use related"
            )),
        }
    }

    /// Sets an object reference property to a live instance.
    pub fn set_object(&mut self, field: &str, object: Object) -> Result<()> {
        self.check_mutable()?;
        let declared = self.field(field)?;
        if declared.kind != FieldKind::ObjectRef {
            return Err(Error::unsupported_type(format!(
                "field `{field}` of kind {} cannot hold an object reference",
                declared.kind
            )));
        }
        *self.slot_mut(field) = Slot::Ref(RefSlot::Loaded(Box::new(object)));
        self.dirty = true;
        Ok(())
    }

    /// Reads an object reference property. `None` when the reference is
    /// null; an error when the slot holds an unmaterialized memo (possible
    /// only on cycle-broken shallow loads).
    pub fn object(&self, field: &str) -> Result<Option<&Object>> {
        let declared = self.field(field)?;
        if declared.kind != FieldKind::ObjectRef {
            return Err(err!("field `{field}` is not an object reference"));
        }
        match &self.slots[field] {
            Slot::Ref(RefSlot::Null) => Ok(None),
            Slot::Ref(RefSlot::Loaded(object)) => Ok(Some(object)),
            Slot::Ref(RefSlot::Memo(reference)) => Err(err!(
                "reference `{field}` is not materialized; it points at {}",
                reference.memo()
            )),
            _ => unreachable!("object reference field holds a non-reference slot"),
        }
    }

    /// Reads a collection-of-objects property.
    pub fn related(&self, field: &str) -> Result<&[Object]> {
        self.related_field(field)?;
        match &self.slots[field] {
            Slot::Related(Some(objects)) => Ok(objects),
            Slot::Related(None) => Err(err!("relation `{field}` is not loaded")),
            _ => unreachable!("collection field holds a non-collection slot"),
        }
    }

    /// Replaces a collection-of-objects property.
    pub fn set_related(&mut self, field: &str, objects: Vec<Object>) -> Result<()> {
        self.check_mutable()?;
        self.related_field(field)?;
        *self.slot_mut(field) = Slot::Related(Some(objects));
        self.dirty = true;
        Ok(())
    }

    /// Appends one object to a loaded collection property.
    pub fn push_related(&mut self, field: &str, object: Object) -> Result<()> {
        self.check_mutable()?;
        self.related_field(field)?;
        match self.slot_mut(field) {
            Slot::Related(Some(objects)) => {
                objects.push(object);
                self.dirty = true;
                Ok(())
            }
            Slot::Related(None) => Err(err!("relation `{field}` is not loaded")),
            _ => unreachable!("collection field holds a non-collection slot"),
        }
    }

    fn check_mutable(&self) -> Result<()> {
        if self.is_deleted() {
            return Err(Error::use_after_delete(self.model.name.clone()));
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Result<&larder_core::schema::Field> {
        self.model
            .field(name)
            .ok_or_else(|| Error::unknown_field(name))
    }

    fn related_field(&self, name: &str) -> Result<()> {
        let declared = self.field(name)?;
        if !declared.kind.is_related() {
            return Err(err!("field `{name}` is not a collection of objects"));
        }
        Ok(())
    }

    pub(crate) fn slot(&self, name: &str) -> &Slot {
        &self.slots[name]
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> &mut Slot {
        self.slots
            .get_mut(name)
            .expect("slot table mirrors the model's field list")
    }

    pub(crate) fn set_slot(&mut self, name: &str, slot: Slot) {
        *self.slot_mut(name) = slot;
    }

    pub(crate) fn marker(&self) -> Marker {
        let mut children = Vec::new();
        for slot in self.slots.values() {
            match slot {
                Slot::Ref(RefSlot::Loaded(referenced)) => children.push(referenced.marker()),
                Slot::Related(Some(objects)) => {
                    children.extend(objects.iter().map(Object::marker));
                }
                _ => {}
            }
        }
        Marker {
            ident: self.ident,
            state: self.state,
            dirty: self.dirty,
            children,
        }
    }

    pub(crate) fn restore(&mut self, marker: Marker) {
        self.ident = marker.ident;
        self.state = marker.state;
        self.dirty = marker.dirty;

        let mut children = marker.children.into_iter();
        for slot in self.slots.values_mut() {
            match slot {
                Slot::Ref(RefSlot::Loaded(referenced)) => {
                    if let Some(child) = children.next() {
                        referenced.restore(child);
                    }
                }
                Slot::Related(Some(objects)) => {
                    for object in objects.iter_mut() {
                        if let Some(child) = children.next() {
                            object.restore(child);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    pub(crate) fn set_persisted(&mut self, ident: Ident) {
        self.ident = Some(ident);
        self.state = State::Persisted;
        self.dirty = false;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.ident = None;
        self.state = State::Deleted;
    }
}

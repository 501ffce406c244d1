use super::{name, registry, Field, FieldKind, Model};
use crate::{bail, Error, Result};

use std::sync::Arc;

/// Declares a model's persistable fields, validates them, and registers the
/// result.
///
/// `build()` is populate-once: if a model with the same name is already
/// registered, the cached `Arc<Model>` is returned and this declaration is
/// discarded.
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
}

impl ModelBuilder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Declares a stored scalar field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.push(name.into(), kind, false, false);
        self
    }

    /// Declares a reflected-but-never-stored field.
    pub fn transient(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.push(name.into(), kind, true, false);
        self
    }

    /// Declares a reference to one other persistent object.
    pub fn object(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), FieldKind::ObjectRef, false, false);
        self
    }

    /// Declares an ordered collection of other persistent objects, wired
    /// through link records.
    pub fn relation(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), FieldKind::Related, false, true);
        self
    }

    /// Declares a collection of persistent objects that is *not* wired:
    /// introspectable and settable in memory, never persisted or loaded.
    pub fn detached(mut self, name: impl Into<String>) -> Self {
        self.push(name.into(), FieldKind::Related, false, false);
        self
    }

    fn push(&mut self, name: String, kind: FieldKind, transient: bool, relation: bool) {
        let column = name::snake_case(&name);
        self.fields.push(Field {
            name,
            column,
            kind,
            transient,
            relation,
        });
    }

    /// Validates the declaration and registers it, returning the cached
    /// model.
    pub fn build(self) -> Result<Arc<Model>> {
        if !name::is_identifier(&self.name) {
            bail!("model name `{}` is not identifier-shaped", self.name);
        }

        for (index, field) in self.fields.iter().enumerate() {
            if !name::is_identifier(&field.name) {
                bail!(
                    "field name `{}` on model `{}` is not identifier-shaped",
                    field.name,
                    self.name
                );
            }
            if field.transient && field.kind.is_related() {
                bail!(
                    "field `{}` on model `{}`: a relation collection cannot be transient",
                    field.name,
                    self.name
                );
            }
            debug_assert!(!field.relation || field.kind.is_related());

            // The identity column is allocated by the store.
            if field.column == "id" {
                return Err(Error::ambiguous_field(format!(
                    "field `{}` on model `{}` collides with the reserved `id` column",
                    field.name, self.name
                )));
            }
            for other in &self.fields[..index] {
                if other.column == field.column {
                    return Err(Error::ambiguous_field(format!(
                        "fields `{}` and `{}` on model `{}` both map to column `{}`",
                        other.name, field.name, self.name, field.column
                    )));
                }
            }
        }

        let table = name::snake_case(&self.name);
        Ok(registry::register(Model {
            name: self.name,
            table,
            fields: self.fields,
        }))
    }
}

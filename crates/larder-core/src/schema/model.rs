use super::{Field, ModelBuilder};

/// The reflected shape of one object type: an ordered field list plus the
/// storage table name.
///
/// Field order is declaration order and stable across process runs; it
/// drives column ordering. Built through [`Model::builder`] and cached in
/// the registry, so two builds of the same name observe the same `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// The declared model name, also the registry key.
    pub name: String,

    /// Storage table name: the snake_case normalization of `name`.
    pub table: String,

    /// Declared fields, in declaration order.
    pub fields: Vec<Field>,
}

impl Model {
    /// Starts declaring a model.
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name.into())
    }

    /// Looks up a field by declared name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields that occupy a column in the primary row, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_column())
    }

    /// Relation collection fields wired through link records.
    pub fn relations(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.relation)
    }
}

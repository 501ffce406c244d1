use crate::Ident;

/// Owner side of a relation collection: which object and which field the
/// links belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    /// The owner's row table.
    pub table: String,

    /// The owner's identity.
    pub owner: Ident,

    /// The relation field's declared name.
    pub field: String,
}

impl LinkKey {
    pub fn new(table: impl Into<String>, owner: Ident, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            owner,
            field: field.into(),
        }
    }
}

/// One element of a relation collection, persisted separately from the
/// owner's row.
///
/// The ordinal preserves sequence order on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The related object's model name. Collections may be heterogeneous, so
    /// each link carries its own target model.
    pub target_model: String,

    /// The related object's identity.
    pub target: Ident,

    /// Position in the collection.
    pub ordinal: i64,
}

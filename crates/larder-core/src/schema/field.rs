use super::FieldKind;

/// One declared property of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The declared property name.
    pub name: String,

    /// Storage column name: the snake_case normalization of `name`.
    pub column: String,

    /// The property's kind.
    pub kind: FieldKind,

    /// Reflected but never stored.
    pub transient: bool,

    /// True if this field's collection is wired through link records. A
    /// `Related` field with `relation == false` is a detached, in-memory-only
    /// view.
    pub relation: bool,
}

impl Field {
    /// Returns `true` if this field occupies a column in the primary row.
    ///
    /// Transient fields and relation collections (attached or detached) do
    /// not.
    pub fn is_column(&self) -> bool {
        !self.transient && !self.kind.is_related()
    }
}

use crate::FieldValue;

use std::fmt;

/// The closed set of property kinds the engine can persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer or float scalar.
    Number,

    /// Text scalar.
    Text,

    /// Point in time, millisecond precision.
    Date,

    /// Raw array of `len` fixed-size elements, `width` bytes each.
    FixedBytes { len: usize, width: usize },

    /// Opaque binary payload, stored verbatim.
    Blob,

    /// Caller-defined value struct, stored verbatim. The codec neither
    /// validates nor interprets its layout.
    Struct,

    /// Ordered collection of atoms.
    List,

    /// Keyed collection of atoms.
    Map,

    /// Unordered collection of atoms; membership only.
    Set,

    /// Identity-based reference to one other persistent object.
    ObjectRef,

    /// Ordered collection of other persistent objects, backed by link
    /// records rather than a column.
    Related,
}

impl FieldKind {
    /// Returns `true` if a slot of this kind may hold the given value.
    /// `Null` fits every kind.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Null) => true,
            (Self::Number, FieldValue::Int(_) | FieldValue::Float(_)) => true,
            (Self::Text, FieldValue::Text(_)) => true,
            (Self::Date, FieldValue::Date(_)) => true,
            (Self::FixedBytes { .. }, FieldValue::FixedBytes(_)) => true,
            (Self::Blob, FieldValue::Blob(_)) => true,
            (Self::Struct, FieldValue::Struct(_)) => true,
            (Self::List, FieldValue::List(_)) => true,
            (Self::Map, FieldValue::Map(_)) => true,
            (Self::Set, FieldValue::Set(_)) => true,
            (Self::ObjectRef, FieldValue::Ref(_)) => true,
            _ => false,
        }
    }

    pub const fn is_related(&self) -> bool {
        matches!(self, Self::Related)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::Text => f.write_str("text"),
            Self::Date => f.write_str("date"),
            Self::FixedBytes { len, width } => write!(f, "fixed bytes({len}x{width})"),
            Self::Blob => f.write_str("blob"),
            Self::Struct => f.write_str("struct"),
            Self::List => f.write_str("list"),
            Self::Map => f.write_str("map"),
            Self::Set => f.write_str("set"),
            Self::ObjectRef => f.write_str("object reference"),
            Self::Related => f.write_str("relation collection"),
        }
    }
}

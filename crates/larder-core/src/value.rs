use crate::{Error, Result};

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// The uniform wire representation exchanged between the row mapper and the
/// store. Every property value, whatever its declared kind, crosses the store
/// boundary as exactly one of these five tags.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit float
    F64(f64),

    /// Text value
    Text(String),

    /// Raw bytes
    Bytes(Vec<u8>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(&v[..]),
            _ => None,
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I64(v) => Ok(v),
            _ => Err(Error::corrupt_encoding(format!(
                "expected integer value, got {}",
                self.tag_name()
            ))),
        }
    }

    /// Short tag name, used in error messages.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::I64(_) => "integer",
            Self::F64(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::Text(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::Text(src)
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

/// Primary-key identity of a persisted object, allocated by the store on
/// first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident(i64);

impl Ident {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for Ident {
    fn from(src: i64) -> Self {
        Self(src)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A point in time with fixed millisecond precision.
///
/// Stored as a signed count of milliseconds since the Unix epoch (UTC), so
/// dates round-trip through storage exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    /// The current time, truncated to millisecond precision.
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i64,
            Err(before_epoch) => -(before_epoch.duration().as_millis() as i64),
        };
        Self(millis)
    }
}

/// Identity-based reference to another persisted object.
///
/// Encoded in-row as the text memo `"Model:ident"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub model: String,
    pub ident: Ident,
}

impl ObjectRef {
    pub fn new(model: impl Into<String>, ident: Ident) -> Self {
        Self {
            model: model.into(),
            ident,
        }
    }

    pub fn memo(&self) -> String {
        format!("{}:{}", self.model, self.ident)
    }

    pub fn parse_memo(memo: &str) -> Result<Self> {
        let (model, ident) = memo.rsplit_once(':').ok_or_else(|| {
            Error::corrupt_encoding(format!("malformed object reference memo `{memo}`"))
        })?;
        if model.is_empty() {
            return Err(Error::corrupt_encoding(format!(
                "malformed object reference memo `{memo}`"
            )));
        }
        let ident: i64 = ident.parse().map_err(|_| {
            Error::corrupt_encoding(format!("malformed object reference memo `{memo}`"))
        })?;
        Ok(Self {
            model: model.to_string(),
            ident: Ident::new(ident),
        })
    }
}

/// Element of an encodable collection. Closed and recursive, so containers
/// can nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Null,
    Int(i64),
    Float(f64),
    Date(Timestamp),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Atom>),
    /// Key/value entries in insertion order; canonicalized by the codec.
    Map(Vec<(Atom, Atom)>),
    /// Membership only; order is unspecified.
    Set(Vec<Atom>),
}

impl From<i64> for Atom {
    fn from(src: i64) -> Self {
        Self::Int(src)
    }
}

impl From<f64> for Atom {
    fn from(src: f64) -> Self {
        Self::Float(src)
    }
}

impl From<&str> for Atom {
    fn from(src: &str) -> Self {
        Self::Text(src.to_string())
    }
}

impl From<String> for Atom {
    fn from(src: String) -> Self {
        Self::Text(src)
    }
}

impl From<Vec<u8>> for Atom {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<Timestamp> for Atom {
    fn from(src: Timestamp) -> Self {
        Self::Date(src)
    }
}

/// What an object's scalar slot holds before encoding.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum FieldValue {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Date(Timestamp),
    FixedBytes(Vec<u8>),
    Blob(Vec<u8>),
    Struct(Vec<u8>),
    List(Vec<Atom>),
    Map(Vec<(Atom, Atom)>),
    Set(Vec<Atom>),
    Ref(ObjectRef),
}

impl FieldValue {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short shape name, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Blob(_) => "blob",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Ref(_) => "object reference",
        }
    }
}

impl From<i64> for FieldValue {
    fn from(src: i64) -> Self {
        Self::Int(src)
    }
}

impl From<f64> for FieldValue {
    fn from(src: f64) -> Self {
        Self::Float(src)
    }
}

impl From<&str> for FieldValue {
    fn from(src: &str) -> Self {
        Self::Text(src.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(src: String) -> Self {
        Self::Text(src)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(src: Vec<u8>) -> Self {
        Self::Blob(src)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(src: Timestamp) -> Self {
        Self::Date(src)
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(src: ObjectRef) -> Self {
        Self::Ref(src)
    }
}

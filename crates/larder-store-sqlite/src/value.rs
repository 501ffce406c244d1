use larder_core::Value as CoreValue;

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Bridges the core wire value onto SQLite's storage classes. The five wire
/// tags map one-to-one: null, INTEGER, REAL, TEXT, BLOB.
#[derive(Debug)]
pub(crate) struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::Text(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
        }
    }
}

/// Converts a SQLite value back to the core wire value.
pub(crate) fn from_sql(value: ValueRef<'_>) -> rusqlite::Result<CoreValue> {
    Ok(match value {
        ValueRef::Null => CoreValue::Null,
        ValueRef::Integer(v) => CoreValue::I64(v),
        ValueRef::Real(v) => CoreValue::F64(v),
        ValueRef::Text(v) => CoreValue::Text(
            std::str::from_utf8(v)
                .map_err(|err| rusqlite::Error::Utf8Error(err))?
                .to_string(),
        ),
        ValueRef::Blob(v) => CoreValue::Bytes(v.to_vec()),
    })
}

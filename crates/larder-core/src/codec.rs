//! The type codec: converts one property value between its in-memory form
//! and the uniform wire representation.
//!
//! `encode` is a pure function of `(value, kind)` — identical input always
//! yields byte-identical output. Both directions are total over the closed
//! kind set: a value whose shape does not fit the kind fails with an
//! unsupported type error on encode, and a wire value whose tag does not fit
//! the kind fails with a corrupt encoding error on decode.

mod wire;

use crate::schema::FieldKind;
use crate::{Error, FieldValue, ObjectRef, Result, Timestamp, Value};

/// Encodes a single property value for storage under the given kind.
pub fn encode(value: &FieldValue, kind: &FieldKind) -> Result<Value> {
    if matches!(kind, FieldKind::Related) {
        return Err(Error::unsupported_type(
            "relation collections have no column encoding",
        ));
    }
    if value.is_null() {
        return Ok(Value::Null);
    }

    match (kind, value) {
        (FieldKind::Number, FieldValue::Int(v)) => Ok(Value::I64(*v)),
        (FieldKind::Number, FieldValue::Float(v)) => {
            if !v.is_finite() {
                return Err(Error::unsupported_type(
                    "non-finite float has no storage representation",
                ));
            }
            Ok(Value::F64(*v))
        }
        (FieldKind::Text, FieldValue::Text(v)) => Ok(Value::Text(v.clone())),
        (FieldKind::Date, FieldValue::Date(ts)) => Ok(Value::I64(ts.millis())),
        (FieldKind::FixedBytes { len, width }, FieldValue::FixedBytes(bytes)) => {
            let expected = len * width;
            if bytes.len() != expected {
                return Err(Error::size_mismatch(expected, bytes.len()));
            }
            Ok(Value::Bytes(bytes.clone()))
        }
        (FieldKind::Blob, FieldValue::Blob(bytes)) => Ok(Value::Bytes(bytes.clone())),
        (FieldKind::Struct, FieldValue::Struct(bytes)) => Ok(Value::Bytes(bytes.clone())),
        (FieldKind::List, FieldValue::List(items)) => Ok(Value::Bytes(wire::encode_list(items)?)),
        (FieldKind::Map, FieldValue::Map(entries)) => Ok(Value::Bytes(wire::encode_map(entries)?)),
        (FieldKind::Set, FieldValue::Set(items)) => Ok(Value::Bytes(wire::encode_set(items)?)),
        (FieldKind::ObjectRef, FieldValue::Ref(reference)) => Ok(Value::Text(reference.memo())),
        (kind, value) => Err(Error::unsupported_type(format!(
            "{} value cannot encode as {kind}",
            value.shape_name()
        ))),
    }
}

/// Decodes a stored wire value back into a property value of the given kind.
pub fn decode(value: Value, kind: &FieldKind) -> Result<FieldValue> {
    if matches!(kind, FieldKind::Related) {
        return Err(Error::unsupported_type(
            "relation collections have no column encoding",
        ));
    }
    if value.is_null() {
        return Ok(FieldValue::Null);
    }

    match (kind, value) {
        (FieldKind::Number, Value::I64(v)) => Ok(FieldValue::Int(v)),
        (FieldKind::Number, Value::F64(v)) => Ok(FieldValue::Float(v)),
        (FieldKind::Text, Value::Text(v)) => Ok(FieldValue::Text(v)),
        (FieldKind::Date, Value::I64(millis)) => {
            Ok(FieldValue::Date(Timestamp::from_millis(millis)))
        }
        (FieldKind::FixedBytes { len, width }, Value::Bytes(bytes)) => {
            let expected = len * width;
            if bytes.len() != expected {
                return Err(Error::size_mismatch(expected, bytes.len()));
            }
            Ok(FieldValue::FixedBytes(bytes))
        }
        (FieldKind::Blob, Value::Bytes(bytes)) => Ok(FieldValue::Blob(bytes)),
        (FieldKind::Struct, Value::Bytes(bytes)) => Ok(FieldValue::Struct(bytes)),
        (FieldKind::List, Value::Bytes(bytes)) => Ok(FieldValue::List(wire::decode_list(&bytes)?)),
        (FieldKind::Map, Value::Bytes(bytes)) => Ok(FieldValue::Map(wire::decode_map(&bytes)?)),
        (FieldKind::Set, Value::Bytes(bytes)) => Ok(FieldValue::Set(wire::decode_set(&bytes)?)),
        (FieldKind::ObjectRef, Value::Text(memo)) => {
            Ok(FieldValue::Ref(ObjectRef::parse_memo(&memo)?))
        }
        (kind, value) => Err(Error::corrupt_encoding(format!(
            "{} value is incompatible with {kind}",
            value.tag_name()
        ))),
    }
}

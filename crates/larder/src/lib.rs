pub mod db;
pub use db::Db;

mod engine;

mod object;
pub use object::Object;

pub use larder_core::{
    codec,
    schema::{self, FieldKind},
    store::{self, Link, LinkKey, Row, Store},
    Atom, Error, FieldValue, Ident, Model, ObjectRef, Result, Timestamp, Value,
};

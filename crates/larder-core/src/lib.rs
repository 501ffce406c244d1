mod error;
pub use error::Error;

pub mod codec;

pub mod schema;
pub use schema::Model;

pub mod store;
pub use store::Store;

pub mod value;
pub use value::{Atom, FieldValue, Ident, ObjectRef, Timestamp, Value};

/// A Result type alias that uses Larder's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

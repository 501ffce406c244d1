//! The schema reflector: models declare their persistable shape through a
//! builder, validation runs once, and the result is cached in a process-wide
//! registry keyed by model name.

mod builder;
pub use builder::ModelBuilder;

mod field;
pub use field::Field;

mod kind;
pub use kind::FieldKind;

mod model;
pub use model::Model;

mod name;

pub mod registry;

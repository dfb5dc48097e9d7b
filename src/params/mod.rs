//! Caller input, field schemas, and the engine that maps one onto the other.

pub mod commands;
pub mod mapping;
pub mod schema;
pub mod value;

pub use commands::CommandSchema;
pub use mapping::{map_fields, numeric_pair, ArgSet};
pub use schema::{Dest, FieldSpec, FieldType, Schema};
pub use value::{Fields, Value};

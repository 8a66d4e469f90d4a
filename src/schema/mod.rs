//! Schema declaration subsystem
//!
//! Schemas are named, immutable field declarations. A schema may be declared
//! as a subset of another schema, in which case the declaration succeeds
//! only if every field it names is also declared by the superset.
//!
//! # Design Principles
//!
//! - The subset check runs exactly once, when the schema is built
//! - A failed declaration produces no schema value
//! - Every missing field is reported in a single error
//! - Field names are the criterion; constraints only on explicit opt-in
//! - Chained subsets validate against their immediate superset only
//! - Declaration order is preserved for stable introspection and messages

mod builder;
mod errors;
mod registry;
mod subset;
mod types;

pub use builder::SchemaBuilder;
pub use errors::{ErrorKind, FieldMismatch, SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{Bounds, Field, FieldDef, FieldType, Schema, SchemaRef};

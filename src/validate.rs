//! Row-level validation seam
//!
//! Validating and filtering actual rows against field constraints is the
//! job of an external engine, not this crate. The trait below is the
//! capability the surrounding system plugs such an engine into, keyed on
//! the schema types declared here.

use serde_json::Value;

use crate::schema::Schema;

/// Capability contract for an external row-validation engine.
///
/// Given a schema and a table of rows, the engine validates rows against
/// the schema's field constraints and returns the rows it accepts. Engines
/// with a strict-filter policy additionally drop columns the schema does
/// not declare. This crate ships no implementation.
pub trait TableValidator {
    /// Engine-specific failure type
    type Error: std::error::Error;

    /// Validates `rows` against `schema`
    fn validate_table(&self, schema: &Schema, rows: &[Value])
        -> Result<Vec<Value>, Self::Error>;
}

//! The subset-field check
//!
//! A subset schema may declare only field names its superset also declares.
//! The check runs exactly once, when the subset is built, and compares
//! directly against the immediate superset: chained subsets are never
//! flattened transitively. Field names are the only criterion; definition
//! comparison is a separate opt-in pass.

use super::errors::{FieldMismatch, SchemaError, SchemaResult};
use super::types::{Field, Schema};

/// Verifies that every declared field name appears in the superset.
///
/// A declaration with zero fields is vacuously valid. On failure the error
/// carries every missing field, in the subset's declaration order, plus the
/// superset's full field list.
pub(crate) fn check_field_names(
    subset_name: &str,
    fields: &[Field],
    superset: &Schema,
) -> SchemaResult<()> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|f| !superset.contains_field(&f.name))
        .map(|f| f.name.clone())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(SchemaError::FieldsNotInSuperset {
        subset: subset_name.to_string(),
        superset: superset.name().to_string(),
        missing,
        available: superset.field_names().map(str::to_string).collect(),
    })
}

/// Verifies that every shared field carries an identical definition.
///
/// Runs only on explicit opt-in; the default subset check is name-only.
/// Fields missing from the superset are not reported here, that is
/// [`check_field_names`]'s job and it runs first.
pub(crate) fn check_constraints(
    subset_name: &str,
    fields: &[Field],
    superset: &Schema,
) -> SchemaResult<()> {
    let mismatches: Vec<FieldMismatch> = fields
        .iter()
        .filter_map(|f| {
            let superset_def = superset.field(&f.name)?;
            if *superset_def == f.def {
                None
            } else {
                Some(FieldMismatch {
                    field: f.name.clone(),
                    subset_decl: f.def.to_string(),
                    superset_decl: superset_def.to_string(),
                })
            }
        })
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }

    Err(SchemaError::ConstraintMismatch {
        subset: subset_name.to_string(),
        superset: superset.name().to_string(),
        mismatches,
    })
}

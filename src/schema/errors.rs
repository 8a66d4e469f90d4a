//! Schema declaration error types
//!
//! Two failure classes, both fatal to the declaration that raised them:
//! - CONFIGURATION: the declaration itself is unusable (bad structure,
//!   unknown or unresolvable superset reference, registry conflict,
//!   malformed declaration file)
//! - SUBSET_VALIDATION: the superset resolved, but the declared fields are
//!   not a subset of the superset's fields
//!
//! Subset validation messages enumerate every offending field in one error,
//! never one at a time.

use std::fmt;
use thiserror::Error;

/// Result type for schema declaration operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failure class of a [`SchemaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Declaration unusable before any subset comparison could run
    Configuration,
    /// Declared fields are not a subset of the superset's fields
    SubsetValidation,
}

impl ErrorKind {
    /// Returns the string code for this class
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::SubsetValidation => "SUBSET_VALIDATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shared field whose definition differs between subset and superset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    /// Field name
    pub field: String,
    /// The subset's definition, rendered for display
    pub subset_decl: String,
    /// The superset's definition, rendered for display
    pub superset_decl: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': subset declares {}, superset declares {}",
            self.field, self.subset_decl, self.superset_decl
        )
    }
}

/// Errors raised while declaring, registering, or loading schemas
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Structurally invalid declaration (empty name, duplicate field, ...)
    #[error("schema '{name}': {reason}")]
    InvalidDeclaration {
        /// Schema name as declared
        name: String,
        /// What is wrong with the declaration
        reason: String,
    },

    /// Superset named in the declaration is not a registered schema
    #[error("subset '{subset}': superset '{superset}' is not a recognized schema")]
    UnknownSuperset {
        /// Subset schema name
        subset: String,
        /// The unresolved superset name
        superset: String,
    },

    /// Superset was given by name but the declaration was built without a
    /// registry to resolve it against
    #[error("subset '{subset}': superset '{superset}' is named by string and requires a registry to resolve")]
    UnresolvedSuperset {
        /// Subset schema name
        subset: String,
        /// The superset name that could not be resolved
        superset: String,
    },

    /// A schema with this name is already registered
    #[error("schema '{name}' is already registered")]
    AlreadyRegistered {
        /// Conflicting schema name
        name: String,
    },

    /// Declaration file could not be read or parsed
    #[error("schema file '{path}': {reason}")]
    MalformedSchemaFile {
        /// File path as displayed
        path: String,
        /// Read or parse failure description
        reason: String,
    },

    /// One or more declared fields are absent from the superset
    #[error(
        "subset '{subset}' declares fields not in superset '{superset}': [{missing_list}] (superset declares: [{available_list}])",
        missing_list = .missing.join(", "),
        available_list = .available.join(", ")
    )]
    FieldsNotInSuperset {
        /// Subset schema name
        subset: String,
        /// Superset schema name
        superset: String,
        /// Every missing field, in the subset's declaration order
        missing: Vec<String>,
        /// The superset's declared fields, in its declaration order
        available: Vec<String>,
    },

    /// Shared fields carry different definitions (opt-in check)
    #[error(
        "subset '{subset}' conflicts with superset '{superset}' on shared fields: {list}",
        list = format_mismatches(.mismatches)
    )]
    ConstraintMismatch {
        /// Subset schema name
        subset: String,
        /// Superset schema name
        superset: String,
        /// Every mismatching field, in the subset's declaration order
        mismatches: Vec<FieldMismatch>,
    },
}

impl SchemaError {
    /// Returns the failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::FieldsNotInSuperset { .. } | SchemaError::ConstraintMismatch { .. } => {
                ErrorKind::SubsetValidation
            }
            _ => ErrorKind::Configuration,
        }
    }

    /// Whether this is a configuration error
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Whether this is a subset validation error
    pub fn is_subset_validation(&self) -> bool {
        self.kind() == ErrorKind::SubsetValidation
    }
}

fn format_mismatches(mismatches: &[FieldMismatch]) -> String {
    let parts: Vec<String> = mismatches.iter().map(|m| m.to_string()).collect();
    parts.join("; ")
}

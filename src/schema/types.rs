//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - bool: Boolean
//! - float: 64-bit floating point
//!
//! Schemas are flat column declarations: no nesting, no arrays. Declaration
//! order is preserved so subset field listings and error messages are stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::builder::SchemaBuilder;

/// Shared handle to a constructed schema.
///
/// Subset declarations hold the same `Arc` they were given as superset, so
/// `superset()` returns the original reference, never a copy.
pub type SchemaRef = Arc<Schema>;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Inclusive numeric bounds carried by a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Value must be greater than or equal to this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<f64>,
    /// Value must be less than or equal to this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<f64>,
}

impl Bounds {
    /// Lower bound only
    pub fn at_least(min: f64) -> Self {
        Self {
            ge: Some(min),
            le: None,
        }
    }

    /// Upper bound only
    pub fn at_most(max: f64) -> Self {
        Self {
            ge: None,
            le: Some(max),
        }
    }

    /// Both bounds
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            ge: Some(min),
            le: Some(max),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ge, self.le) {
            (Some(ge), Some(le)) => write!(f, "ge {}, le {}", ge, le),
            (Some(ge), None) => write!(f, "ge {}", ge),
            (None, Some(le)) => write!(f, "le {}", le),
            (None, None) => write!(f, "unbounded"),
        }
    }
}

/// Field definition: type, presence requirement, optional bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
    /// Optional numeric bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl FieldDef {
    /// Create a required string field
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            bounds: None,
        }
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            bounds: None,
        }
    }

    /// Create a required int field
    pub fn required_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: true,
            bounds: None,
        }
    }

    /// Create an optional int field
    pub fn optional_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: false,
            bounds: None,
        }
    }

    /// Create a required bool field
    pub fn required_bool() -> Self {
        Self {
            field_type: FieldType::Bool,
            required: true,
            bounds: None,
        }
    }

    /// Create a required float field
    pub fn required_float() -> Self {
        Self {
            field_type: FieldType::Float,
            required: true,
            bounds: None,
        }
    }

    /// Create an optional float field
    pub fn optional_float() -> Self {
        Self {
            field_type: FieldType::Float,
            required: false,
            bounds: None,
        }
    }

    /// Attach bounds to the definition
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = if self.required { "required" } else { "optional" };
        match &self.bounds {
            Some(bounds) => write!(f, "{} {} ({})", presence, self.field_type, bounds),
            None => write!(f, "{} {}", presence, self.field_type),
        }
    }
}

/// A named field declaration within a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field definition
    #[serde(flatten)]
    pub def: FieldDef,
}

impl Field {
    pub fn new(name: impl Into<String>, def: FieldDef) -> Self {
        Self {
            name: name.into(),
            def,
        }
    }
}

/// A constructed, immutable schema.
///
/// Built only through [`SchemaBuilder`]; a schema that failed its subset
/// check never exists as a value. Fields keep declaration order.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    superset: Option<SchemaRef>,
}

impl Schema {
    /// Starts a new schema declaration
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub(crate) fn new(name: String, fields: Vec<Field>, superset: Option<SchemaRef>) -> Self {
        Self {
            name,
            fields,
            superset,
        }
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Looks up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.def)
    }

    /// Whether the schema declares the given field
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Whether the schema was declared as a subset
    pub fn is_subset(&self) -> bool {
        self.superset.is_some()
    }

    /// The superset this schema was declared against, if any.
    ///
    /// Returns the reference supplied at declaration time; a plain schema
    /// returns `None`.
    pub fn superset(&self) -> Option<&SchemaRef> {
        self.superset.as_ref()
    }

    /// The subset's own field names, in declaration order.
    ///
    /// Only subset schemas carry this view; plain schemas return `None`
    /// (use [`Schema::field_names`] for unconditional introspection).
    pub fn subset_fields(&self) -> Option<impl Iterator<Item = &str>> {
        self.superset.as_ref()?;
        Some(self.field_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(
            "users".into(),
            vec![
                Field::new("user_id", FieldDef::required_int()),
                Field::new("name", FieldDef::required_string()),
                Field::new("age", FieldDef::optional_int()),
            ],
            None,
        )
    }

    #[test]
    fn test_field_names_keep_declaration_order() {
        let schema = sample_schema();
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["user_id", "name", "age"]);
    }

    #[test]
    fn test_field_lookup() {
        let schema = sample_schema();
        assert!(schema.contains_field("name"));
        assert!(!schema.contains_field("email"));
        assert_eq!(schema.field("age"), Some(&FieldDef::optional_int()));
        assert!(schema.field("email").is_none());
    }

    #[test]
    fn test_plain_schema_has_no_subset_view() {
        let schema = sample_schema();
        assert!(!schema.is_subset());
        assert!(schema.superset().is_none());
        assert!(schema.subset_fields().is_none());
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Bool.type_name(), "bool");
        assert_eq!(FieldType::Float.type_name(), "float");
    }

    #[test]
    fn test_field_def_display() {
        let def = FieldDef::required_int().with_bounds(Bounds::between(0.0, 120.0));
        assert_eq!(def.to_string(), "required int (ge 0, le 120)");
        assert_eq!(FieldDef::optional_string().to_string(), "optional string");
    }

    #[test]
    fn test_field_serde_shape() {
        let field = Field::new(
            "age",
            FieldDef::required_int().with_bounds(Bounds::between(0.0, 120.0)),
        );
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["name"], "age");
        assert_eq!(json["type"], "int");
        assert_eq!(json["required"], true);
        assert_eq!(json["bounds"]["ge"], 0.0);
        assert_eq!(json["bounds"]["le"], 120.0);

        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }
}

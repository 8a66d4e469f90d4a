//! Schema construction
//!
//! Every schema is declared through [`SchemaBuilder`]. The builder is the
//! one place the subset check runs: `build` either returns a finished,
//! immutable schema or a typed error, so a subset that fails validation
//! never exists as a value anywhere in the program.

use std::sync::Arc;

use tracing::debug;

use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::subset;
use super::types::{Field, FieldDef, Schema, SchemaRef};

/// How the superset was supplied to the builder
enum SupersetSpec {
    /// An already-constructed schema handle
    Resolved(SchemaRef),
    /// A name to resolve through a registry at build time
    Named(String),
}

/// Builder for declaring schemas, plain or subset.
///
/// ```
/// use subschema::schema::{FieldDef, Schema};
///
/// let full_user = Schema::builder("FullUser")
///     .field("user_id", FieldDef::required_int())
///     .field("name", FieldDef::required_string())
///     .field("email", FieldDef::required_string())
///     .build()?;
///
/// let contact = Schema::builder("Contact")
///     .field("user_id", FieldDef::required_int())
///     .field("email", FieldDef::required_string())
///     .subset_of(full_user.clone())
///     .build()?;
///
/// assert!(contact.subset_fields().unwrap().eq(["user_id", "email"]));
/// # Ok::<(), subschema::schema::SchemaError>(())
/// ```
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    superset: Option<SupersetSpec>,
    match_constraints: bool,
}

impl SchemaBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            superset: None,
            match_constraints: false,
        }
    }

    /// Appends a field declaration. Order is preserved.
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.fields.push(Field::new(name, def));
        self
    }

    /// Declares this schema a subset of an already-constructed superset.
    pub fn subset_of(mut self, superset: SchemaRef) -> Self {
        self.superset = Some(SupersetSpec::Resolved(superset));
        self
    }

    /// Declares this schema a subset of a superset resolved by name through
    /// the registry passed to [`SchemaBuilder::build_in`].
    pub fn subset_of_named(mut self, superset: impl Into<String>) -> Self {
        self.superset = Some(SupersetSpec::Named(superset.into()));
        self
    }

    /// Opt-in: shared fields must also carry identical definitions (type,
    /// presence, bounds). The default check compares field names only.
    pub fn match_constraints(mut self) -> Self {
        self.match_constraints = true;
        self
    }

    /// Builds the schema, running the declaration checks.
    ///
    /// With no superset declared this is a plain schema and no subset check
    /// runs. With a superset, every declared field name must appear in the
    /// superset; a declaration with zero fields is vacuously valid. Failure
    /// aborts construction: no schema value exists on error.
    ///
    /// A superset given by name needs [`SchemaBuilder::build_in`]; calling
    /// `build` instead is a configuration error.
    pub fn build(self) -> SchemaResult<SchemaRef> {
        self.finish(None)
    }

    /// Builds the schema like [`SchemaBuilder::build`], resolving a named
    /// superset through `registry`, and registers the result on success.
    pub fn build_in(self, registry: &mut SchemaRegistry) -> SchemaResult<SchemaRef> {
        let schema = self.finish(Some(registry))?;
        registry.register(Arc::clone(&schema))?;
        Ok(schema)
    }

    fn finish(self, registry: Option<&SchemaRegistry>) -> SchemaResult<SchemaRef> {
        self.check_structure()?;

        let superset = match self.superset {
            None => None,
            Some(SupersetSpec::Resolved(superset)) => Some(superset),
            Some(SupersetSpec::Named(name)) => match registry {
                Some(registry) => {
                    let resolved =
                        registry
                            .get(&name)
                            .cloned()
                            .ok_or_else(|| SchemaError::UnknownSuperset {
                                subset: self.name.clone(),
                                superset: name.clone(),
                            })?;
                    Some(resolved)
                }
                None => {
                    return Err(SchemaError::UnresolvedSuperset {
                        subset: self.name.clone(),
                        superset: name,
                    })
                }
            },
        };

        if let Some(superset) = &superset {
            subset::check_field_names(&self.name, &self.fields, superset)?;
            if self.match_constraints {
                subset::check_constraints(&self.name, &self.fields, superset)?;
            }
            debug!(
                subset = %self.name,
                superset = %superset.name(),
                fields = self.fields.len(),
                "subset schema declared"
            );
        }

        Ok(Arc::new(Schema::new(self.name, self.fields, superset)))
    }

    fn check_structure(&self) -> SchemaResult<()> {
        if self.name.is_empty() {
            return Err(SchemaError::InvalidDeclaration {
                name: self.name.clone(),
                reason: "schema name must not be empty".into(),
            });
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::InvalidDeclaration {
                    name: self.name.clone(),
                    reason: "field names must not be empty".into(),
                });
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::InvalidDeclaration {
                    name: self.name.clone(),
                    reason: format!("duplicate field '{}'", field.name),
                });
            }
        }

        Ok(())
    }
}

//! Named schema registry with JSON declaration files
//!
//! The registry holds one schema per name and never replaces an entry:
//! registering a name twice is a configuration error. It also resolves
//! named superset references for [`SchemaBuilder::build_in`] and reads and
//! writes declaration files, one JSON file per schema.
//!
//! Subset declaration files reference their superset by name, so `load_dir`
//! resolves in two passes: plain schemas first, then subsets against the
//! registry built so far. File order never matters.
//!
//! [`SchemaBuilder::build_in`]: super::SchemaBuilder::build_in

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::errors::{SchemaError, SchemaResult};
use super::types::{Field, Schema, SchemaRef};

/// On-disk schema declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaDecl {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    superset: Option<String>,
    fields: Vec<Field>,
}

impl SchemaDecl {
    fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            superset: schema.superset().map(|s| s.name().to_string()),
            fields: schema.fields().to_vec(),
        }
    }
}

/// In-memory registry of constructed schemas, indexed by name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, SchemaRef>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructed schema under its name.
    ///
    /// Names are immutable once taken; a duplicate is rejected rather than
    /// replaced.
    pub fn register(&mut self, schema: SchemaRef) -> SchemaResult<()> {
        if self.schemas.contains_key(schema.name()) {
            return Err(SchemaError::AlreadyRegistered {
                name: schema.name().to_string(),
            });
        }
        debug!(schema = %schema.name(), fields = schema.field_count(), "schema registered");
        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Gets a schema by name
    pub fn get(&self, name: &str) -> Option<&SchemaRef> {
        self.schemas.get(name)
    }

    /// Whether a schema with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over all registered schemas
    pub fn iter(&self) -> impl Iterator<Item = &SchemaRef> {
        self.schemas.values()
    }

    /// Loads every `*.json` declaration file in `dir` and returns how many
    /// schemas were registered.
    ///
    /// Plain schemas resolve first, then subsets, so a subset file may name
    /// a superset declared in any other file of the same directory. A subset
    /// naming a superset that exists nowhere in the directory (or the
    /// registry beforehand) is a configuration error, as is a file that
    /// fails to read or parse.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| SchemaError::MalformedSchemaFile {
            path: dir.display().to_string(),
            reason: format!("failed to read directory: {}", e),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SchemaError::MalformedSchemaFile {
                path: dir.display().to_string(),
                reason: format!("failed to read directory entry: {}", e),
            })?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        // Stable load order regardless of directory iteration order
        paths.sort();

        let mut decls: Vec<SchemaDecl> = Vec::with_capacity(paths.len());
        for path in &paths {
            decls.push(read_decl(path)?);
        }

        let mut loaded = 0;
        for load_subsets in [false, true] {
            for decl in &decls {
                if decl.superset.is_some() != load_subsets {
                    continue;
                }
                self.declare(decl.clone())?;
                loaded += 1;
            }
        }

        info!(count = loaded, dir = %dir.display(), "schemas loaded");
        Ok(loaded)
    }

    /// Writes a schema's declaration file into `dir` and returns its path.
    ///
    /// A subset's superset link is stored by name. Refuses to overwrite an
    /// existing file.
    pub fn save(&self, schema: &Schema, dir: &Path) -> SchemaResult<PathBuf> {
        let path = dir.join(format!("schema_{}.json", schema.name()));
        if path.exists() {
            return Err(SchemaError::AlreadyRegistered {
                name: schema.name().to_string(),
            });
        }

        fs::create_dir_all(dir).map_err(|e| SchemaError::MalformedSchemaFile {
            path: dir.display().to_string(),
            reason: format!("failed to create directory: {}", e),
        })?;

        let decl = SchemaDecl::from_schema(schema);
        let content =
            serde_json::to_string_pretty(&decl).map_err(|e| SchemaError::MalformedSchemaFile {
                path: path.display().to_string(),
                reason: format!("failed to serialize schema: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| SchemaError::MalformedSchemaFile {
            path: path.display().to_string(),
            reason: format!("failed to write file: {}", e),
        })?;

        Ok(path)
    }

    /// Runs a declaration through the builder, registering the result.
    fn declare(&mut self, decl: SchemaDecl) -> SchemaResult<SchemaRef> {
        let mut builder = Schema::builder(decl.name);
        for field in decl.fields {
            builder = builder.field(field.name, field.def);
        }
        if let Some(superset) = decl.superset {
            builder = builder.subset_of_named(superset);
        }
        builder.build_in(self)
    }
}

fn read_decl(path: &Path) -> SchemaResult<SchemaDecl> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::MalformedSchemaFile {
        path: path.display().to_string(),
        reason: format!("failed to read file: {}", e),
    })?;

    serde_json::from_str(&content).map_err(|e| SchemaError::MalformedSchemaFile {
        path: path.display().to_string(),
        reason: format!("invalid JSON: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::ErrorKind;
    use crate::schema::types::FieldDef;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn full_user() -> SchemaRef {
        Schema::builder("FullUser")
            .field("user_id", FieldDef::required_int())
            .field("name", FieldDef::required_string())
            .field("email", FieldDef::required_string())
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(full_user()).unwrap();

        assert!(registry.contains("FullUser"));
        assert_eq!(registry.get("FullUser").unwrap().name(), "FullUser");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(full_user()).unwrap();

        let err = registry.register(full_user()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::AlreadyRegistered {
                name: "FullUser".into()
            }
        );
    }

    #[test]
    fn test_build_in_resolves_named_superset() {
        let mut registry = SchemaRegistry::new();
        registry.register(full_user()).unwrap();

        let contact = Schema::builder("Contact")
            .field("user_id", FieldDef::required_int())
            .field("email", FieldDef::required_string())
            .subset_of_named("FullUser")
            .build_in(&mut registry)
            .unwrap();

        assert!(Arc::ptr_eq(
            contact.superset().unwrap(),
            registry.get("FullUser").unwrap()
        ));
        assert!(registry.contains("Contact"));
    }

    #[test]
    fn test_unknown_superset_is_configuration_error() {
        let mut registry = SchemaRegistry::new();
        let err = Schema::builder("Contact")
            .field("email", FieldDef::required_string())
            .subset_of_named("Nonexistent")
            .build_in(&mut registry)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("not a recognized schema"));
        // Failed declaration registers nothing
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_subset_check_registers_nothing() {
        let mut registry = SchemaRegistry::new();
        registry.register(full_user()).unwrap();

        let err = Schema::builder("Bad")
            .field("phone", FieldDef::required_string())
            .subset_of_named("FullUser")
            .build_in(&mut registry)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SubsetValidation);
        assert!(!registry.contains("Bad"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new();
        let superset = full_user();
        registry.register(Arc::clone(&superset)).unwrap();

        let contact = Schema::builder("Contact")
            .field("user_id", FieldDef::required_int())
            .field("email", FieldDef::required_string())
            .subset_of(superset)
            .build()
            .unwrap();
        registry.register(Arc::clone(&contact)).unwrap();

        registry
            .save(registry.get("FullUser").unwrap(), temp_dir.path())
            .unwrap();
        registry.save(&contact, temp_dir.path()).unwrap();

        let mut fresh = SchemaRegistry::new();
        let loaded = fresh.load_dir(temp_dir.path()).unwrap();
        assert_eq!(loaded, 2);

        let loaded_contact = fresh.get("Contact").unwrap();
        assert!(loaded_contact.is_subset());
        assert_eq!(loaded_contact.superset().unwrap().name(), "FullUser");
        let fields: Vec<&str> = loaded_contact.subset_fields().unwrap().collect();
        assert_eq!(fields, vec!["user_id", "email"]);
    }

    #[test]
    fn test_load_resolves_subsets_after_plain_schemas() {
        // File names sort the subset before its superset; the two-pass load
        // must still resolve it.
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("a_subset.json"),
            r#"{
                "name": "Contact",
                "superset": "FullUser",
                "fields": [{ "name": "email", "type": "string", "required": true }]
            }"#,
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("z_superset.json"),
            r#"{
                "name": "FullUser",
                "fields": [
                    { "name": "email", "type": "string", "required": true },
                    { "name": "name", "type": "string", "required": true }
                ]
            }"#,
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        assert_eq!(registry.load_dir(temp_dir.path()).unwrap(), 2);
        assert!(registry.get("Contact").unwrap().is_subset());
    }

    #[test]
    fn test_load_rejects_subset_with_unknown_superset() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("orphan.json"),
            r#"{
                "name": "Orphan",
                "superset": "Nowhere",
                "fields": []
            }"#,
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        let err = registry.load_dir(temp_dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let mut registry = SchemaRegistry::new();
        let err = registry.load_dir(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedSchemaFile { .. }));
    }

    #[test]
    fn test_load_skips_non_json_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignore me").unwrap();

        let mut registry = SchemaRegistry::new();
        assert_eq!(registry.load_dir(temp_dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let registry = SchemaRegistry::new();
        let schema = full_user();

        registry.save(&schema, temp_dir.path()).unwrap();
        let err = registry.save(&schema, temp_dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::AlreadyRegistered { .. }));
    }
}

//! subschema - declaration-time subset validation for data schemas
//!
//! A subset schema is a narrower view of a canonical, wider superset schema
//! (a contact-info view of a full user record, say). The subset is checked
//! once, at the moment it is declared: every field it names must also be
//! declared by the superset, so a typo or a removed column fails immediately
//! instead of at data-processing time.
//!
//! ```
//! use subschema::schema::{FieldDef, Schema};
//!
//! let full_user = Schema::builder("FullUser")
//!     .field("user_id", FieldDef::required_int())
//!     .field("name", FieldDef::required_string())
//!     .field("email", FieldDef::required_string())
//!     .field("age", FieldDef::required_int())
//!     .build()?;
//!
//! let contact = Schema::builder("Contact")
//!     .field("user_id", FieldDef::required_int())
//!     .field("name", FieldDef::required_string())
//!     .field("email", FieldDef::required_string())
//!     .subset_of(full_user.clone())
//!     .build()?;
//!
//! assert!(contact.subset_fields().unwrap().eq(["user_id", "name", "email"]));
//!
//! // A field the superset does not declare aborts the declaration.
//! let bad = Schema::builder("Bad")
//!     .field("user_id", FieldDef::required_int())
//!     .field("phone", FieldDef::required_string())
//!     .subset_of(full_user)
//!     .build();
//! assert!(bad.unwrap_err().to_string().contains("phone"));
//! # Ok::<(), subschema::schema::SchemaError>(())
//! ```

pub mod schema;
pub mod validate;

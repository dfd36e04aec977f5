//! Schema catalog for ORMLIKE.
//!
//! The catalog stores entity and field metadata, including the per-field
//! marker that opts a field in or out of pattern rewriting.

mod catalog;
mod entity;
mod field;
mod lookup;
mod schema;
mod types;

pub use catalog::Catalog;
pub use entity::EntityDef;
pub use field::{FieldAnnotation, FieldDef, FieldTag, ANNOTATION_KEY};
pub use lookup::{FieldLookup, LookupFn, NoAnnotations};
pub use schema::SchemaBundle;
pub use types::{FieldType, ScalarType};

//! Schema bundle - versioned snapshot of the entire schema.

use super::EntityDef;
use crate::error::Error;
use rkyv::{Archive, Deserialize, Serialize};
use std::collections::HashMap;

/// A versioned snapshot of the entire schema.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct SchemaBundle {
    /// Schema version (monotonically increasing).
    pub version: u64,
    /// Entity definitions keyed by name.
    pub entities: HashMap<String, EntityDef>,
}

impl SchemaBundle {
    /// Create an empty schema bundle.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            entities: HashMap::new(),
        }
    }

    /// Add an entity to the schema.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    /// Get an entity by name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    /// Serialize the schema bundle to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a schema bundle from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(bytes)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}

impl Default for SchemaBundle {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldAnnotation, FieldDef, FieldType, ScalarType};

    fn sample_schema() -> SchemaBundle {
        let user = EntityDef::new("User", "id")
            .with_field(FieldDef::new("id", FieldType::scalar(ScalarType::Uuid)))
            .with_field(
                FieldDef::new("name", FieldType::scalar(ScalarType::String))
                    .with_pattern_matching(true),
            )
            .with_field(FieldDef::optional("other", ScalarType::String));

        let post = EntityDef::new("Post", "id")
            .with_field(FieldDef::new("id", FieldType::scalar(ScalarType::Uuid)))
            .with_field(FieldDef::new("title", FieldType::scalar(ScalarType::String)));

        SchemaBundle::new(1).with_entity(user).with_entity(post)
    }

    #[test]
    fn test_schema_bundle_builder() {
        let schema = sample_schema();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.entities.len(), 2);
        assert!(schema.entities.contains_key("User"));
    }

    #[test]
    fn test_get_entity() {
        let schema = sample_schema();

        assert!(schema.get_entity("User").is_some());
        assert!(schema.get_entity("Post").is_some());
        assert!(schema.get_entity("NonExistent").is_none());
    }

    #[test]
    fn test_serialization_keeps_annotations() {
        let schema = sample_schema();
        let bytes = schema.to_bytes().unwrap();
        let decoded = SchemaBundle::from_bytes(&bytes).unwrap();

        assert_eq!(schema, decoded);
        let name = decoded.get_entity("User").unwrap().get_field("name").unwrap();
        assert_eq!(name.pattern_annotation(), FieldAnnotation::ExplicitlyEnabled);
    }

    #[test]
    fn test_deserialize_garbage() {
        let err = SchemaBundle::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }
}

//! Catalog holding the current schema for query-time lookups.

use super::{EntityDef, SchemaBundle};
use crate::error::Error;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe holder of the current schema.
///
/// Readers get a shared snapshot; applying a new schema swaps it atomically.
#[derive(Debug, Default)]
pub struct Catalog {
    current: RwLock<Arc<SchemaBundle>>,
}

impl Catalog {
    /// Create an empty catalog (schema version 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from an initial schema.
    pub fn with_schema(schema: SchemaBundle) -> Self {
        Self {
            current: RwLock::new(Arc::new(schema)),
        }
    }

    /// Restore a catalog from a serialized schema snapshot.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::with_schema(SchemaBundle::from_bytes(bytes)?))
    }

    /// Serialize the current schema.
    pub fn snapshot(&self) -> Result<Vec<u8>, Error> {
        self.current_schema().to_bytes()
    }

    /// Apply a new schema version.
    ///
    /// The version must be strictly greater than the current one.
    pub fn apply_schema(&self, schema: SchemaBundle) -> Result<(), Error> {
        let mut current = self.current.write();
        if schema.version <= current.version {
            return Err(Error::SchemaVersion {
                current: current.version,
                proposed: schema.version,
            });
        }
        tracing::debug!(version = schema.version, "applied schema");
        *current = Arc::new(schema);
        Ok(())
    }

    /// Get the current schema snapshot.
    pub fn current_schema(&self) -> Arc<SchemaBundle> {
        Arc::clone(&self.current.read())
    }

    /// Get the current schema version.
    pub fn current_version(&self) -> u64 {
        self.current.read().version
    }

    /// Get an entity definition from the current schema.
    pub fn entity(&self, name: &str) -> Option<EntityDef> {
        self.current.read().get_entity(name).cloned()
    }
}
